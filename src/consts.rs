pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const DEFAULT_ROUTINE_DURATION_MIN: i64 = 15;
pub const DEFAULT_APPOINTMENT_DURATION_MIN: i64 = 30;
pub const DEFAULT_REMINDER_LEAD_MIN: i64 = 60;

/// Reference weight the calorie formula is normalized against.
pub const CALORIE_REFERENCE_WEIGHT_KG: f64 = 30.0;

pub const WELCOME_MESSAGE: &str = "Hi! I am your pet assistant. How can I help you today?";
pub const CHAT_CLEARED_MESSAGE: &str = "Conversation cleared. You can start a new chat.";
pub const CHAT_FAILURE_MESSAGE: &str = "Sorry, something went wrong. Please try again.";
