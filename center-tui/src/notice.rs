/// One entry in the activity log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    System,
    Success,
    Help,
    Error,
}

impl Notice {
    pub fn new(text: impl Into<String>, level: NoticeLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }
}
