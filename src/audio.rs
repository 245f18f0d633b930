//! Background audio: one worker owns the tone device, everything else queues.
//!
//! The tick loop must never wait on sound, so tones travel through a bounded
//! `mpsc` channel filled with `try_send`. The worker plays them one after the
//! other, holding each for its duration the way a buzzer would. The optional
//! melody sequencer feeds the same queue.

use std::time::Duration;

use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{debug, trace};

use crate::core::{Tone, ToneDevice};

pub const TONE_QUEUE_CAPACITY: usize = 16;

/// Silence between melody notes.
pub const NOTE_GAP_MS: u64 = 80;
/// The melody loops for this long before resting.
pub const PHRASE_MS: u64 = 30_000;
pub const PHRASE_REST_MS: u64 = 2_000;

/// "Twinkle Twinkle Little Star" (public domain).
#[rustfmt::skip]
pub const TWINKLE: [Tone; 28] = [
    Tone::new(261, 300), Tone::new(261, 300), Tone::new(392, 300), Tone::new(392, 300),
    Tone::new(440, 300), Tone::new(440, 300), Tone::new(392, 600),
    Tone::new(349, 300), Tone::new(349, 300), Tone::new(330, 300), Tone::new(330, 300),
    Tone::new(294, 300), Tone::new(294, 300), Tone::new(261, 600),
    Tone::new(392, 300), Tone::new(392, 300), Tone::new(349, 300), Tone::new(349, 300),
    Tone::new(330, 300), Tone::new(330, 300), Tone::new(294, 600),
    Tone::new(392, 300), Tone::new(392, 300), Tone::new(349, 300), Tone::new(349, 300),
    Tone::new(330, 300), Tone::new(330, 300), Tone::new(294, 600),
];

/// Sending half of the tone queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ToneQueue {
    tx: mpsc::Sender<Tone>,
}

impl ToneQueue {
    /// Queue a tone without blocking. Returns `false` if it was dropped.
    pub fn send(&self, tone: Tone) -> bool {
        match self.tx.try_send(tone) {
            Ok(()) => true,
            Err(TrySendError::Full(tone)) => {
                debug!(
                    frequency_hz = tone.frequency_hz,
                    "tone queue full, dropping tone"
                );
                false
            }
            Err(TrySendError::Closed(_)) => {
                debug!("tone worker gone, dropping tone");
                false
            }
        }
    }

    /// Queue a tone, waiting for room. Used by the melody sequencer only.
    pub async fn send_wait(&self, tone: Tone) -> bool {
        self.tx.send(tone).await.is_ok()
    }
}

impl ToneDevice for ToneQueue {
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        self.send(Tone::new(frequency_hz, duration_ms));
    }
}

/// Create a tone queue and its worker.
///
/// The worker is the only code that touches `device`. It ends when every
/// [`ToneQueue`] clone has been dropped.
pub fn tone_channel<D>(
    device: D,
    capacity: usize,
) -> (ToneQueue, impl std::future::Future<Output = D>)
where
    D: ToneDevice + Send + 'static,
{
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (ToneQueue { tx }, run_tone_worker(rx, device))
}

async fn run_tone_worker<D: ToneDevice>(mut rx: mpsc::Receiver<Tone>, mut device: D) -> D {
    while let Some(tone) = rx.recv().await {
        trace!(
            frequency_hz = tone.frequency_hz,
            duration_ms = tone.duration_ms,
            "play tone"
        );
        if !tone.is_rest() {
            device.play_tone(tone.frequency_hz, tone.duration_ms);
        }
        sleep(Duration::from_millis(tone.duration_ms as u64)).await;
    }
    debug!("tone worker stopped");
    device
}

/// Loop `melody` forever: play for one phrase, rest, start over from the top.
pub async fn run_melody(queue: ToneQueue, melody: &'static [Tone]) {
    if melody.is_empty() {
        return;
    }
    loop {
        let phrase_start = Instant::now();
        for note in melody.iter().cycle() {
            if phrase_start.elapsed() >= Duration::from_millis(PHRASE_MS) {
                break;
            }
            if !queue.send_wait(*note).await {
                return;
            }
            sleep(Duration::from_millis(note.duration_ms as u64 + NOTE_GAP_MS)).await;
        }
        trace!("melody phrase done");
        sleep(Duration::from_millis(PHRASE_REST_MS)).await;
    }
}

/// Audio tasks running on their own runtime.
///
/// Dropping it shuts the runtime down and stops every task.
pub struct AudioSystem {
    _rt: Runtime,
    queue: ToneQueue,
    worker: JoinHandle<()>,
    melody: Option<JoinHandle<()>>,
}

impl AudioSystem {
    pub fn start<D>(device: D, music: bool) -> anyhow::Result<Self>
    where
        D: ToneDevice + Send + 'static,
    {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("tiny-tetris-audio")
            .enable_time()
            .build()?;
        let (queue, worker) = tone_channel(device, TONE_QUEUE_CAPACITY);
        let worker = rt.spawn(async move {
            worker.await;
        });
        let melody = music.then(|| rt.spawn(run_melody(queue.clone(), &TWINKLE)));
        debug!(music, "audio started");
        Ok(Self {
            _rt: rt,
            queue,
            worker,
            melody,
        })
    }

    pub fn queue(&self) -> ToneQueue {
        self.queue.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.worker.is_finished()
            && self
                .melody
                .as_ref()
                .map_or(true, |m| !m.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<(u32, u32)>>>);

    impl ToneDevice for Recorder {
        fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
            self.0.lock().unwrap().push((frequency_hz, duration_ms));
        }
    }

    #[test]
    fn melody_is_twenty_eight_audible_notes() {
        assert_eq!(TWINKLE.len(), 28);
        assert!(TWINKLE.iter().all(|n| !n.is_rest()));
        assert!(TWINKLE.iter().all(|n| n.duration_ms == 300 || n.duration_ms == 600));
    }

    #[tokio::test(start_paused = true)]
    async fn worker_plays_in_order_and_skips_rests() {
        let recorder = Recorder::default();
        let (mut queue, worker) = tone_channel(recorder.clone(), 4);
        queue.play_tone(880, 40);
        queue.send(Tone::rest(10));
        queue.send(Tone::new(440, 20));
        drop(queue);

        worker.await;
        assert_eq!(*recorder.0.lock().unwrap(), vec![(880, 40), (440, 20)]);
    }

    #[tokio::test(start_paused = true)]
    async fn full_queue_drops_instead_of_blocking() {
        let (queue, _worker) = tone_channel(Recorder::default(), 2);
        assert!(queue.send(Tone::SOFT_DROP));
        assert!(queue.send(Tone::SOFT_DROP));
        assert!(!queue.send(Tone::SOFT_DROP));
    }

    #[tokio::test(start_paused = true)]
    async fn send_after_worker_exit_is_dropped() {
        let (queue, worker) = tone_channel(Recorder::default(), 2);
        drop(worker);
        assert!(!queue.send(Tone::SOFT_DROP));
    }

    #[tokio::test(start_paused = true)]
    async fn melody_rests_after_a_phrase() {
        let recorder = Recorder::default();
        let (queue, worker) = tone_channel(recorder.clone(), TONE_QUEUE_CAPACITY);
        tokio::spawn(worker);
        let melody = tokio::spawn(run_melody(queue, &TWINKLE));

        // Every note plus its gap is at least 380ms, so one phrase holds at most 79 notes.
        sleep(Duration::from_millis(PHRASE_MS + 1_000)).await;
        let played = recorder.0.lock().unwrap().len();
        assert!(played > 28 && played <= 80, "played {played}");

        // Nothing new during the rest.
        sleep(Duration::from_millis(500)).await;
        assert_eq!(recorder.0.lock().unwrap().len(), played);

        // Next phrase starts again from the first note.
        sleep(Duration::from_millis(PHRASE_REST_MS)).await;
        let notes = recorder.0.lock().unwrap().clone();
        assert!(notes.len() > played);
        assert_eq!(notes[played], (261, 300));
        melody.abort();
    }

    #[test]
    fn worker_idles_until_the_queue_closes() {
        let (queue, worker) = tone_channel(Recorder::default(), 2);
        let mut worker = tokio_test::task::spawn(worker);
        tokio_test::assert_pending!(worker.poll());

        drop(queue);
        assert!(worker.is_woken());
        tokio_test::assert_ready!(worker.poll());
    }

    #[test]
    fn audio_system_starts_and_queues() {
        let recorder = Recorder::default();
        let audio = AudioSystem::start(recorder.clone(), false).unwrap();
        assert!(audio.queue().send(Tone::SOFT_DROP));
        assert!(audio.is_running());
        for _ in 0..200 {
            if !recorder.0.lock().unwrap().is_empty() {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(*recorder.0.lock().unwrap(), vec![(880, 40)]);
    }
}
