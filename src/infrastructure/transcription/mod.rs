mod assembly_ai_client;
mod mock_transcription_client;

pub use assembly_ai_client::AssemblyAiClient;
pub use mock_transcription_client::MockTranscriptionClient;
