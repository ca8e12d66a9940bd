//! ユーザー向け通知
//!
//! 表示方法（トースト、コンソール等）は呼び出し側が `Notifier` で決める

use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    PhotoCaptured,
    CaptureFailed,
    Identified { name: String, points: u32 },
    IdentificationFailed { reason: String },
    AddedToCollection { name: String },
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::CaptureFailed | Notice::IdentificationFailed { .. })
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::PhotoCaptured => write!(f, "Photo captured successfully!"),
            Notice::CaptureFailed => write!(f, "Failed to capture image. Please try again."),
            Notice::Identified { name, points } => write!(f, "Identified {}! +{} points", name, points),
            Notice::IdentificationFailed { .. } => {
                write!(f, "Failed to identify object. Please try again.")
            }
            Notice::AddedToCollection { name } => write!(f, "Added {} to your collection!", name),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// チャネルへ流す（受信側が閉じていれば捨てる）
impl Notifier for UnboundedSender<Notice> {
    fn notify(&self, notice: Notice) {
        let _ = self.send(notice);
    }
}
