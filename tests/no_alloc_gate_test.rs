use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tiny_tetris::core::{BoardView, Fired, GameEngine, Image, ScriptedPieces};
use tiny_tetris::types::{Direction, PieceKind, Rgb};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = layout;
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = (layout, new_size);
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

fn run_session(engine: &mut GameEngine<ScriptedPieces>, all: Fired) {
    // Idle, input and gravity ticks, including lock, line clear, spawn and
    // board resets once the stack reaches the top.
    let mut now = 10;
    for i in 0..2_000u64 {
        now += 20;
        let fired = if i % 3 == 0 { all } else { Fired::NONE };
        let _ = engine.step(fired, now);
    }
}

#[test]
fn engine_and_frame_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut all = Fired::NONE;
    for d in Direction::ALL {
        all.insert(d);
    }
    let new_engine = || {
        let mut engine = GameEngine::with_fall_interval(ScriptedPieces::new(PieceKind::ALL), 50);
        engine.start(0);
        engine
    };

    // Warm-up so first-use registration happens outside the counted window.
    let mut warm = new_engine();
    run_session(&mut warm, all);

    let mut engine = new_engine();
    let view = BoardView::default();
    let (w, h) = view.image_size();
    let mut frame = Image::new(w, h, Rgb::default());

    let allocs = with_alloc_counting(|| {
        run_session(&mut engine, all);
        for _ in 0..100 {
            view.render_into(engine.state(), &mut frame);
        }
    });

    assert_eq!(allocs, 0);
    assert!(engine.state().pieces_locked() > 0);
}
