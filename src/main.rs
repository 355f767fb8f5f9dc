use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    #[cfg(windows)]
    return run();

    #[cfg(not(windows))]
    anyhow::bail!("memsonar only supports Windows targets");
}

#[cfg(windows)]
fn run() -> Result<()> {
    use memsonar::{Sonar, SonarConfig};
    use std::thread;
    use std::time::Duration;
    use tracing::{error, info};
    use winapi::um::winuser::{GetAsyncKeyState, VK_HOME, VK_INSERT};

    // 'F'
    const KEY_SCAN: i32 = 0x46;
    const POLL_INTERVAL: Duration = Duration::from_millis(100);

    fn key_down(vk: i32) -> bool {
        // High bit is set while the key is held
        (unsafe { GetAsyncKeyState(vk) } as u16) & 0x8000 != 0
    }

    let config = SonarConfig::load_or_default("memsonar.toml");
    info!(
        process = %config.process_name,
        "starting memsonar v{} (insert = attach, F = scan, home = exit)",
        memsonar::core::VERSION
    );

    let mut sonar = Sonar::new(config);

    while !key_down(VK_HOME) {
        thread::sleep(POLL_INTERVAL);

        if key_down(VK_INSERT) {
            if sonar.load() {
                info!("loaded successfully");
            } else {
                info!("could not load");
            }
        }

        if key_down(KEY_SCAN) && sonar.is_ready() {
            match sonar.scan() {
                Ok(count) => info!(count, "detected {count} entities"),
                Err(err) => error!(error = %err, "scan failed"),
            }
        }
    }

    Ok(())
}
