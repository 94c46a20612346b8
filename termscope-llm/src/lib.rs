mod chat;
mod embedding;
mod error;

pub use chat::ApiChatModel;
pub use embedding::ApiEmbedding;
pub use error::EmbeddingProviderError;
