//! Chat panel - view model

use leptos::prelude::*;

/// Upload widget status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Uploading,
    Done,
    Error,
}

#[derive(Clone, Copy)]
pub struct ChatPanelVm {
    pub input: RwSignal<String>,
    pub is_sending: RwSignal<bool>,
    pub is_uploading: RwSignal<bool>,
    /// Fraction of bytes sent, 0.0..=1.0.
    pub upload_progress: RwSignal<f64>,
    pub upload_phase: RwSignal<UploadPhase>,
    pub upload_status: RwSignal<Option<String>>,
    pub drag_over: RwSignal<bool>,
}

impl ChatPanelVm {
    pub fn new() -> Self {
        Self {
            input: RwSignal::new(String::new()),
            is_sending: RwSignal::new(false),
            is_uploading: RwSignal::new(false),
            upload_progress: RwSignal::new(0.0),
            upload_phase: RwSignal::new(UploadPhase::Idle),
            upload_status: RwSignal::new(None),
            drag_over: RwSignal::new(false),
        }
    }
}
