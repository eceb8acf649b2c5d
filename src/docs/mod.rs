use utoipa::OpenApi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health_check,
        handlers::ready_check,
        handlers::login,
        handlers::register,
        handlers::create_document,
        handlers::get_document,
        handlers::list_documents,
        handlers::update_content,
        handlers::get_versions,
        handlers::set_document_permission,
        handlers::upload_file,
        handlers::chat,
        handlers::analyze_command,
        handlers::speech_to_text,
        handlers::text_to_speech,
        handlers::add_friend,
        handlers::respond_friend,
        handlers::list_friends,
        handlers::diagnostics,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            LoginRequest,
            TokenResponse,
            RegisterRequest,
            RegisterResponse,
            CreateDocumentRequest,
            CreateDocumentResponse,
            DocumentResponse,
            DocumentSummary,
            UpdateContentRequest,
            UpdateContentResponse,
            VersionResponse,
            SetPermissionRequest,
            PermissionResponse,
            UploadResponse,
            ChatMessage,
            ChatRequest,
            ChatResponse,
            AnalyzeCommandRequest,
            SpeechToTextRequest,
            SpeechToTextResponse,
            TextToSpeechRequest,
            TextToSpeechResponse,
            FriendEntry,
            FriendStatusRequest,
            FriendResponse,
            DiagnosticsResponse,
        )
    ),
    tags(
        (name = "api", description = "Smart Assistant backend endpoints")
    )
)]
pub struct ApiDoc;
