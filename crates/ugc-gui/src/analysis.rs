//! Background image analysis
//!
//! Each request runs on its own thread with a single-threaded tokio runtime
//! and reports back over a channel polled from the UI thread.

use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use tracing::debug;
use ugc_app::AnalysisTicket;
use ugc_types::{AnalysisKind, AnalysisOutcome, Error, Result};
use ugc_vision::{ImageAnalyzer, ImageUpload, IMAGE_EXTENSIONS};

/// Result delivered from an analysis thread
pub struct AnalysisMessage {
    pub ticket: AnalysisTicket,
    pub result: Result<AnalysisOutcome>,
}

pub struct AnalysisWorker {
    analyzer: Arc<dyn ImageAnalyzer>,
    sender: Sender<AnalysisMessage>,
    receiver: Receiver<AnalysisMessage>,
}

impl AnalysisWorker {
    pub fn new(analyzer: Arc<dyn ImageAnalyzer>) -> Self {
        let (sender, receiver) = channel();
        Self {
            analyzer,
            sender,
            receiver,
        }
    }

    pub fn spawn(&self, ctx: &egui::Context, ticket: AnalysisTicket, upload: ImageUpload) {
        let analyzer = Arc::clone(&self.analyzer);
        let sender = self.sender.clone();
        let ctx = ctx.clone();

        thread::spawn(move || {
            let result = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt.block_on(analyzer.analyze(ticket.kind, &upload)),
                Err(e) => Err(Error::Io(e)),
            };
            debug!("{} analysis finished: ok={}", ticket.kind.label(), result.is_ok());
            // The UI may be gone by now
            let _ = sender.send(AnalysisMessage { ticket, result });
            ctx.request_repaint();
        });
    }

    /// Drain finished analyses
    pub fn poll(&self) -> Vec<AnalysisMessage> {
        self.receiver.try_iter().collect()
    }
}

/// Uploader for one analysis kind
pub struct UploadSlot {
    pub kind: AnalysisKind,
    /// Validated image waiting to be analyzed
    pub upload: Option<ImageUpload>,
    /// Uploader expanded (actor and scene only; Escape collapses)
    pub open: bool,
}

impl UploadSlot {
    pub fn new(kind: AnalysisKind) -> Self {
        Self {
            kind,
            upload: None,
            open: kind == AnalysisKind::Product,
        }
    }

    /// Ask the user for an image file
    pub fn pick_file() -> Option<PathBuf> {
        rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
    }

    pub fn clear(&mut self) {
        self.upload = None;
        if self.kind != AnalysisKind::Product {
            self.open = false;
        }
    }
}

/// One uploader per analysis kind
pub struct Uploads {
    pub product: UploadSlot,
    pub actor: UploadSlot,
    pub scene: UploadSlot,
}

impl Uploads {
    pub fn new() -> Self {
        Self {
            product: UploadSlot::new(AnalysisKind::Product),
            actor: UploadSlot::new(AnalysisKind::Actor),
            scene: UploadSlot::new(AnalysisKind::Scene),
        }
    }

    pub fn slot_mut(&mut self, kind: AnalysisKind) -> &mut UploadSlot {
        match kind {
            AnalysisKind::Product => &mut self.product,
            AnalysisKind::Actor => &mut self.actor,
            AnalysisKind::Scene => &mut self.scene,
        }
    }

    /// Collapse the optional uploaders
    pub fn close_all(&mut self) {
        self.actor.open = false;
        self.scene.open = false;
    }

    pub fn clear_all(&mut self) {
        self.product.clear();
        self.actor.clear();
        self.scene.clear();
    }
}
