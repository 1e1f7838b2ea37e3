//! Concurrency behaviour of the renderer adapter

use flowcraft_common::Theme;
use flowcraft_renderer::{DiagramEngine, DiagramRenderer, EngineConfig, RenderError};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

/// Engine that blocks until the test releases it
struct GatedEngine {
    gate: Mutex<mpsc::Receiver<()>>,
}

impl DiagramEngine for GatedEngine {
    fn name(&self) -> &'static str {
        "gated"
    }

    fn render_svg(&self, _source: &str, config: &EngineConfig) -> Result<String, RenderError> {
        if config.theme == Theme::Light {
            let gate = self.gate.lock().unwrap();
            gate.recv().unwrap();
        }
        Ok(format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1\" height=\"1\" data-bg=\"{}\"></svg>",
            config.palette.background
        ))
    }
}

#[test]
fn test_in_flight_call_keeps_its_snapshot_after_reconfigure() {
    let (release, gate) = mpsc::channel();
    let renderer = Arc::new(DiagramRenderer::new(Arc::new(GatedEngine {
        gate: Mutex::new(gate),
    })));

    let slow = {
        let renderer = Arc::clone(&renderer);
        thread::spawn(move || renderer.render("graph TD\n A-->B"))
    };

    // Give the slow call time to take its snapshot and block
    thread::sleep(std::time::Duration::from_millis(50));
    renderer.reconfigure(Theme::Dark);

    let fast = renderer.render("graph TD\n A-->B").unwrap();
    assert_eq!(fast.theme(), Theme::Dark);

    release.send(()).unwrap();
    let slow = slow.join().unwrap().unwrap();
    assert_eq!(slow.theme(), Theme::Light);
    assert!(slow.svg().contains("#FFFFFF"));
    assert!(fast.svg().contains("#1E1E2E"));
}

#[test]
fn test_reconfigure_is_idempotent() {
    let (_release, gate) = mpsc::channel();
    let renderer = DiagramRenderer::new(Arc::new(GatedEngine {
        gate: Mutex::new(gate),
    }));

    renderer.reconfigure(Theme::Dark);
    renderer.reconfigure(Theme::Dark);
    assert_eq!(renderer.config(), EngineConfig::for_theme(Theme::Dark));
}
