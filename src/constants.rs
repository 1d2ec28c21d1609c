// API Constants
pub const CHAT_ENDPOINT_PATH: &str = "/chat";
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

// Fixed fallback strings for the two gateway failure tiers
pub const NO_RESPONSE_FALLBACK: &str = "No response from AI.";
pub const CONNECT_FAILURE_FALLBACK: &str =
    "Sorry, I'm having trouble connecting. Please try again later.";

// Greetings
pub const WELCOME_GREETING: &str = "Hi there! I'm ChatPal. How are you feeling today?";
pub const NEW_CHAT_GREETING: &str = "Starting a new conversation. How can I help you today?";

// Cosmetic pacing defaults (milliseconds)
pub const DEFAULT_REPLY_DELAY_BASE_MS: u64 = 500;
pub const DEFAULT_REPLY_DELAY_JITTER_MS: u64 = 800;
pub const DEFAULT_WELCOME_DELAY_MS: u64 = 500;
pub const DEFAULT_NEW_CHAT_DELAY_MS: u64 = 300;
