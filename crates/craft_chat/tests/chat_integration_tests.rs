//! Integration tests for chat and UX Genius.

use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

use craft_chat::{
    export_markdown, save_image, Attachment, ChatSession, GeniusClient, GeniusPrompt, ImageStudio,
    PersonaBrief, QuickTool, QuickTools, Sender, TurnState, DEFAULT_EXPORT_FILE,
    DEFAULT_IMAGE_FILE,
};
use craft_genai::{GeneratedImage, GenerationResponse, GroundingSource, MockBackend};

/// Chunks reach the caller and the transcript in arrival order.
#[tokio::test]
async fn test_stream_order_is_preserved() {
    let backend = MockBackend::new().reply_chunks(["One, ", "two, ", "three."]);
    let mut session = ChatSession::new(backend);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let reply = session
        .send_with("count", None, move |chunk| sink.lock().unwrap().push(chunk.to_string()))
        .await
        .unwrap();

    assert_eq!(reply, "One, two, three.");
    assert_eq!(*seen.lock().unwrap(), vec!["One, ", "two, ", "three."]);

    let transcript = session.transcript();
    assert_eq!(transcript.state(), TurnState::Idle);
    assert_eq!(transcript.messages().len(), 2);
    assert_eq!(transcript.messages()[1].sender, Sender::Bot);
    assert_eq!(transcript.messages()[1].text, "One, two, three.");
}

/// An oversized image is refused before anything is sent.
#[tokio::test]
async fn test_oversized_attachment_from_disk() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("huge.png");
    fs::write(&path, vec![0u8; 4 * 1024 * 1024 + 10]).unwrap();

    let err = Attachment::from_path(&path).unwrap_err();
    assert_eq!(
        err.to_string(),
        "File is too large. Please select a file smaller than 4MB."
    );

    let small = temp.path().join("small.jpg");
    fs::write(&small, b"jpeg").unwrap();
    let attachment = Attachment::from_path(&small).unwrap();
    assert_eq!(attachment.mime_type, "image/jpeg");
    assert_eq!(attachment.file_name, "small.jpg");

    let backend = MockBackend::new().reply_chunks(["A photo"]);
    let mut session = ChatSession::new(backend.clone());
    session.send("", Some(attachment)).await.unwrap();
    assert_eq!(backend.call_count(), 1);
}

/// Persona output can be generated and saved as markdown.
#[tokio::test]
async fn test_persona_to_markdown_file() {
    let backend = MockBackend::new().reply_text("## Maya, 34\n\nFreelance designer.");
    let client = GeniusClient::new(backend);

    let prompt = GeniusPrompt::persona(PersonaBrief {
        goal: "Invoice clients quickly".into(),
        pain_points: "Chasing late payments".into(),
        ..PersonaBrief::default()
    })
    .unwrap();
    let markdown = client.generate(&prompt).await.unwrap();

    let temp = tempdir().unwrap();
    let path = temp.path().join(DEFAULT_EXPORT_FILE);
    export_markdown(&path, &markdown).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), markdown);
}

/// An image read from disk is edited and the result lands on disk as bytes.
#[tokio::test]
async fn test_edit_image_from_disk() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("screen.png");
    fs::write(&input, b"png bytes").unwrap();
    let image = Attachment::from_path(&input).unwrap();

    // "ZWRpdGVk" is base64 for "edited"
    let backend = MockBackend::new().reply_image(GeneratedImage {
        mime_type: "image/png".into(),
        data: "ZWRpdGVk".into(),
    });
    let studio = ImageStudio::new(backend);
    let edited = studio.edit(Some(&image), "add a dark header").await.unwrap();

    let out = temp.path().join(DEFAULT_IMAGE_FILE);
    save_image(&out, &edited).unwrap();
    assert_eq!(fs::read(&out).unwrap(), b"edited");
}

/// Research answers carry their sources into the saved markdown.
#[tokio::test]
async fn test_research_answer_export() {
    let backend = MockBackend::new().reply_response(GenerationResponse {
        text: "Keep forms short.".into(),
        sources: vec![GroundingSource {
            uri: "https://example.com/forms".into(),
            title: "Form design".into(),
        }],
        ..GenerationResponse::default()
    });
    let answer = QuickTools::new(backend)
        .run(QuickTool::Researcher, "checkout form best practices")
        .await
        .unwrap();

    let temp = tempdir().unwrap();
    let path = temp.path().join(QuickTool::Researcher.export_file());
    let sources = answer.sources_markdown().unwrap();
    export_markdown(&path, &format!("{}\n\n{}", answer.text, sources)).unwrap();

    let saved = fs::read_to_string(&path).unwrap();
    assert!(saved.starts_with("Keep forms short."));
    assert!(saved.contains("1. [Form design](https://example.com/forms)"));
}
