//! Drives a full open / draw / poll / close session against the headless backend.

use spd_display::backends::HeadlessBackend;
use spd_display::{Color, Display, DisplayConfig, InputEvent, PresentMode};

fn init_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

fn test_config(present_mode: PresentMode) -> DisplayConfig {
    DisplayConfig {
        title: "headless".to_string(),
        present_mode,
        poll_interval_ms: 0,
        ..DisplayConfig::default()
    }
    .with_size(64, 48)
}

#[test]
fn test_render_session() {
    init_logging();

    let background = Color::new(0.2, 0.2, 0.4);
    let mut backend = HeadlessBackend::new();
    backend.idle().idle().press_key(13);

    let mut display = Display::open(backend, &test_config(PresentMode::Immediate), background)
        .expect("headless open");
    assert_eq!(
        display.backend().presented_pixel(0, 0),
        Some(background.to_rgba8())
    );

    // Fan of lines from the center, aborted by a key like a long render would be
    let center = (32, 24);
    let mut lines = 0;
    for i in 0..16 {
        if display.kbhit().unwrap() {
            break;
        }
        let x = i * 4;
        display
            .line(center.0, center.1, x, 0, Color::new(1.0, x as f64 / 64.0, 0.0))
            .unwrap();
        lines += 1;
    }

    assert_eq!(lines, 2);
    assert_eq!(display.backend().present_count(), 1 + lines);
    assert_eq!(display.backend().presented_pixel(32, 24), Some([255, 15, 0, 255]));
    assert_eq!(display.backend().presented_pixel(0, 0), Some([255, 0, 0, 255]));

    assert_eq!(display.backend().poll_count(), 3);

    // The abort key is still queued and ends the wait
    display.close(true).unwrap();
}

#[test]
fn test_deferred_session() {
    init_logging();

    let mut display = Display::open(
        HeadlessBackend::new(),
        &test_config(PresentMode::Deferred),
        Color::WHITE,
    )
    .unwrap();

    for x in 0..64 {
        display.plot(x, x * 48 / 64, Color::BLACK).unwrap();
    }
    assert_eq!(display.backend().present_count(), 1);
    assert_eq!(display.frame().pixel(63, 47), Some([0, 0, 0, 255]));

    display.present().unwrap();
    assert_eq!(display.backend().present_count(), 2);
    assert_eq!(display.backend().presented_pixel(63, 47), Some([0, 0, 0, 255]));
    assert_eq!(
        display.backend().presented_pixel(0, 47),
        Some([255, 255, 255, 255])
    );

    display.clear().unwrap();
    assert_eq!(display.backend().present_count(), 3);
    assert_eq!(display.backend().presented_pixel(0, 47), Some([0, 0, 0, 255]));
}

#[test]
fn test_close_ignores_key_release_and_focus() {
    init_logging();

    let mut backend = HeadlessBackend::new();
    backend
        .events(&[InputEvent::KeyUp])
        .events(&[InputEvent::FocusLost])
        .events(&[InputEvent::Quit]);

    let mut display =
        Display::open(backend, &test_config(PresentMode::Immediate), Color::BLACK).unwrap();
    assert!(!display.kbhit().unwrap());
    assert_eq!(display.take_events(), vec![InputEvent::KeyUp]);

    display.close(true).unwrap();
}
