use rodio::source::{SineWave, Source};
use std::time::Duration;

const ALERT_FREQ_HZ: f32 = 800.0;
const ALERT_LENGTH: Duration = Duration::from_millis(300);

/// Play the completion tone. Best effort: a machine without an audio output
/// simply stays silent, the finished state is unaffected.
pub fn play_alert() {
    std::thread::spawn(|| {
        let (stream, handle) = match rodio::OutputStream::try_default() {
            Ok(out) => out,
            Err(err) => {
                tracing::debug!("no audio output available: {err}");
                return;
            }
        };
        let sink = match rodio::Sink::try_new(&handle) {
            Ok(sink) => sink,
            Err(err) => {
                tracing::debug!("failed to open audio sink: {err}");
                return;
            }
        };
        let tone = SineWave::new(ALERT_FREQ_HZ)
            .take_duration(ALERT_LENGTH)
            .amplify(0.25);
        sink.append(tone);
        // Keep the stream alive until the tone has played out.
        sink.sleep_until_end();
        drop(stream);
    });
}
