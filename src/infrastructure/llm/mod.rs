mod anthropic;

pub use anthropic::AnthropicAnswerer;
