use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host address and port for the HTTP server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:4000")]
    pub server_addr: String,

    /// API key for the Gemini generation endpoint. When unset, every
    /// generation call fails and replies degrade to the apology message.
    #[arg(long, env = "GEMINI_API_KEY")]
    pub gemini_api_key: Option<String>,

    /// Model name for chat completion.
    #[arg(long, env = "CHAT_MODEL", default_value = "gemini-2.5-flash")]
    pub chat_model: String,

    /// Base URL for the Gemini API.
    #[arg(
        long,
        env = "CHAT_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com"
    )]
    pub chat_base_url: String,

    /// Request timeout in seconds for generation calls.
    #[arg(long, env = "RESPONDER_TIMEOUT_SECS", default_value = "30")]
    pub responder_timeout_secs: u64,
}
