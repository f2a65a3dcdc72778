//! Bell played at the end of each interval

use tokio::{process::Command, runtime::Handle};
use tracing::{debug, info, warn};

use crate::state::{Mode, NotificationSink};

/// Audio player used for the cue
pub const PLAYER: &str = "paplay";
/// The single fixed sound played on completion
pub const BELL_SOUND: &str = "/usr/share/sounds/freedesktop/stereo/complete.oga";

/// Notification sink that rings a bell through an external audio player.
///
/// Playback is spawned onto the tokio runtime and never awaited, so a slow or
/// missing player cannot hold up the engine.
#[derive(Debug, Clone)]
pub struct SoundCue {
    muted: bool,
}

impl SoundCue {
    pub fn new(muted: bool) -> Self {
        Self { muted }
    }
}

impl NotificationSink for SoundCue {
    fn interval_complete(&mut self, completed: Mode) {
        info!("{} interval finished, ringing bell", completed);

        if self.muted {
            debug!("Sound cue muted");
            return;
        }

        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async {
                    if let Err(e) = play_bell().await {
                        warn!("{}", e);
                    }
                });
            }
            Err(_) => warn!("No async runtime available, skipping sound cue"),
        }
    }
}

/// Play the bell once and wait for the player to exit
async fn play_bell() -> Result<(), String> {
    debug!("Playing {} with {}", BELL_SOUND, PLAYER);

    let output = Command::new(PLAYER)
        .arg(BELL_SOUND)
        .output()
        .await
        .map_err(|e| format!("Failed to execute {}: {}", PLAYER, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} failed: {}", PLAYER, stderr));
    }

    Ok(())
}

/// Check if the audio player is available on the system
pub async fn check_player_available() -> Result<(), String> {
    Command::new(PLAYER)
        .arg("--version")
        .output()
        .await
        .map_err(|_| format!("{} is not available, interval completion will be silent", PLAYER))?;

    info!("{} is available", PLAYER);
    Ok(())
}
