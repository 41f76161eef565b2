use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const UNNECESSARY_TYPE_CASTING: u32 = 7001;
    pub const REMOVE_UNNECESSARY_CASTING: u32 = 7002;
}

pub mod diagnostic_messages {
    pub const UNNECESSARY_TYPE_CASTING: &str =
        "This type casting is not necessary, as the argument is of needed type.";
    pub const REMOVE_UNNECESSARY_CASTING: &str = "Remove unnecessary '({0})' casting";
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::UNNECESSARY_TYPE_CASTING,
        category: DiagnosticCategory::Suggestion,
        message: diagnostic_messages::UNNECESSARY_TYPE_CASTING,
    },
    DiagnosticMessage {
        code: diagnostic_codes::REMOVE_UNNECESSARY_CASTING,
        category: DiagnosticCategory::Message,
        message: diagnostic_messages::REMOVE_UNNECESSARY_CASTING,
    },
];
