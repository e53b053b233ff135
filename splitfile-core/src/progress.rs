use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::thread;
use std::time::{Duration, Instant};

/// Periodic stderr reporter for long split/merge runs. Counters are atomics
/// so splitter tasks on worker threads can tick them directly; everything is
/// a no-op when constructed disabled.
#[derive(Clone)]
pub struct Progress {
    enabled: bool,
    pub stage: Arc<Mutex<String>>,
    pub parts_done: Arc<AtomicUsize>,
    pub parts_total: Arc<AtomicUsize>,
    pub bytes_done: Arc<AtomicUsize>,
    pub bytes_total: Arc<AtomicUsize>,
    running: Arc<AtomicBool>,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            stage: Arc::new(Mutex::new(String::new())),
            parts_done: Arc::new(AtomicUsize::new(0)),
            parts_total: Arc::new(AtomicUsize::new(0)),
            bytes_done: Arc::new(AtomicUsize::new(0)),
            bytes_total: Arc::new(AtomicUsize::new(0)),
            running: Arc::new(AtomicBool::new(false)),
        }
    }
    pub fn set_stage(&self, s: &str) {
        if self.enabled {
            *self.stage.lock().unwrap() = s.to_string();
        }
    }
    pub fn reset(&self, parts_total: usize, bytes_total: usize) {
        self.parts_done.store(0, Ordering::Relaxed);
        self.parts_total.store(parts_total, Ordering::Relaxed);
        self.bytes_done.store(0, Ordering::Relaxed);
        self.bytes_total.store(bytes_total, Ordering::Relaxed);
    }
    pub fn inc_part(&self) {
        self.parts_done.fetch_add(1, Ordering::Relaxed);
    }
    pub fn add_bytes(&self, n: usize) {
        self.bytes_done.fetch_add(n, Ordering::Relaxed);
    }

    pub fn start(&self) {
        if !self.enabled {
            return;
        }
        self.running.store(true, Ordering::Relaxed);
        let stage = self.stage.clone();
        let parts_done = self.parts_done.clone();
        let parts_total = self.parts_total.clone();
        let bytes_done = self.bytes_done.clone();
        let bytes_total = self.bytes_total.clone();
        let running = self.running.clone();
        thread::spawn(move || {
            let t0 = Instant::now();
            while running.load(Ordering::Relaxed) {
                thread::sleep(Duration::from_secs(2));
                if !running.load(Ordering::Relaxed) {
                    break;
                }
                let s = stage.lock().unwrap().clone();
                let pd = parts_done.load(Ordering::Relaxed);
                let pt = parts_total.load(Ordering::Relaxed);
                let bd = bytes_done.load(Ordering::Relaxed);
                let bt = bytes_total.load(Ordering::Relaxed);
                let bpct = if bt > 0 { (bd as f64 / bt as f64) * 100.0 } else { 0.0 };
                eprintln!(
                    "[{:>4}s] {} | parts {}/{} | bytes {}%",
                    t0.elapsed().as_secs(),
                    s,
                    pd,
                    pt,
                    bpct as i32
                );
            }
        });
    }
    pub fn stop(&self) {
        if self.enabled {
            self.running.store(false, Ordering::Relaxed);
        }
    }
}
