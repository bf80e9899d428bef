//! **Speaker** — the single serialized speech resource shared by all sessions.
//!
//! Native TTS engines do not tolerate concurrent invocations, so every call
//! funnels through one async mutex regardless of how many connections are
//! active. Synthesis runs under `spawn_blocking` with a bounded timeout;
//! playback happens on a dedicated thread because the audio output stream is
//! not `Send` on every platform. When server TTS is disabled, `speak` is a
//! no-op that always succeeds.

use crate::engine::SpeechEngine;
use crate::error::{VoiceError, VoiceResult};
use crate::playback::AudioOut;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::warn;

enum PlayCmd {
    Play {
        bytes: Vec<u8>,
        done: oneshot::Sender<VoiceResult<()>>,
    },
}

/// Serialized, timeout-bounded access to the external speech engine.
pub struct Speaker {
    engine: Arc<dyn SpeechEngine>,
    disabled: bool,
    timeout: Duration,
    lock: Mutex<()>,
    play_tx: mpsc::UnboundedSender<PlayCmd>,
}

impl Speaker {
    pub fn new(engine: Arc<dyn SpeechEngine>, disabled: bool, timeout: Duration) -> Self {
        let (play_tx, play_rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || playback_loop(play_rx));
        Self {
            engine,
            disabled,
            timeout,
            lock: Mutex::new(()),
            play_tx,
        }
    }

    /// Whether server-side speech is administratively disabled.
    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// Synthesize and play `text`. Holds the process-wide speech lock for the
    /// whole invocation; callers from concurrent sessions queue behind it.
    pub async fn speak(&self, text: &str, voice: &str, rate: f32) -> VoiceResult<()> {
        if self.disabled {
            return Ok(());
        }
        let _guard = self.lock.lock().await;

        let engine = Arc::clone(&self.engine);
        let text = text.to_string();
        let voice = voice.to_string();
        let synth = tokio::task::spawn_blocking(move || engine.synthesize(&text, &voice, rate));
        let bytes = match tokio::time::timeout(self.timeout, synth).await {
            Err(_) => {
                warn!(target: "emovoice::voice", "synthesis exceeded {}s, abandoning call", self.timeout.as_secs());
                return Err(VoiceError::Timeout(self.timeout.as_secs()));
            }
            Ok(Err(join_err)) => return Err(VoiceError::Tts(join_err.to_string())),
            Ok(Ok(result)) => result?,
        };
        if bytes.is_empty() {
            return Ok(());
        }

        let (done_tx, done_rx) = oneshot::channel();
        self.play_tx
            .send(PlayCmd::Play { bytes, done: done_tx })
            .map_err(|e| VoiceError::ChannelSend(e.to_string()))?;
        match tokio::time::timeout(self.timeout, done_rx).await {
            Err(_) => Err(VoiceError::Timeout(self.timeout.as_secs())),
            Ok(Err(_)) => Err(VoiceError::Playback("playback thread terminated".to_string())),
            Ok(Ok(result)) => result,
        }
    }
}

fn playback_loop(mut rx: mpsc::UnboundedReceiver<PlayCmd>) {
    // The output device is opened on first use; hosts without audio report a
    // playback error per command instead of failing Speaker construction.
    let mut out: Option<AudioOut> = None;
    while let Some(PlayCmd::Play { bytes, done }) = rx.blocking_recv() {
        let result = play_once(&mut out, bytes);
        if let Err(ref e) = result {
            warn!(target: "emovoice::voice", error = %e, "playback failed");
        }
        let _ = done.send(result);
    }
}

fn play_once(slot: &mut Option<AudioOut>, bytes: Vec<u8>) -> VoiceResult<()> {
    let out = match slot {
        Some(out) => out,
        None => slot.insert(AudioOut::new()?),
    };
    out.play_bytes(&bytes)?;
    out.sleep_until_end();
    Ok(())
}
