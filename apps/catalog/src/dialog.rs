//! Terminal stand-in for the modal dialog host.

use std::sync::atomic::{AtomicBool, Ordering};

use catalog_core::{DialogConfig, DialogHost, DialogMode};
use tracing::debug;

#[derive(Default)]
pub struct TerminalDialogHost {
    open: AtomicBool,
}

impl TerminalDialogHost {
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }
}

impl DialogHost for TerminalDialogHost {
    fn open(&self, config: &DialogConfig) {
        self.open.store(true, Ordering::Release);
        let mode = match config.mode {
            DialogMode::Create => "create",
            DialogMode::Update => "update",
        };
        debug!(mode, title = %config.dialog_title, "dialog opened");
        println!("== {} ==", config.dialog_title);
    }

    fn close(&self) {
        if self.open.swap(false, Ordering::AcqRel) {
            debug!("dialog closed");
        }
    }
}
