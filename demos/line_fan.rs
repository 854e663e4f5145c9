use spd_display::backends::PixelsBackend;
use spd_display::{Color, Display, DisplayConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match DisplayConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            DisplayConfig::default()
        }
    };

    let mut display = Display::open(
        PixelsBackend::new(),
        &config,
        Color::new(0.1, 0.1, 0.2),
    )?;

    let (w, h) = (display.width() as i32, display.height() as i32);
    let (cx, cy) = (w / 2, h / 2);

    // Fan of lines to every edge; any key aborts early
    let steps = 32;
    'fan: for edge in 0..4 {
        for i in 0..steps {
            if display.kbhit()? {
                log::info!("Key pressed, stopping");
                break 'fan;
            }

            let t = i as f64 / steps as f64;
            let (x, y) = match edge {
                0 => ((t * w as f64) as i32, 0),
                1 => (w - 1, (t * h as f64) as i32),
                2 => (w - 1 - (t * w as f64) as i32, h - 1),
                _ => (0, h - 1 - (t * h as f64) as i32),
            };
            let color = Color::new(t, 1.0 - t, edge as f64 / 3.0);
            display.line(cx, cy, x, y, color)?;
        }
    }

    for x in 0..w.min(h) {
        display.plot(x, x, Color::WHITE)?;
    }

    println!("Press a key, click, or close the window to exit");
    display.take_events();
    display.close(true)?;
    Ok(())
}
