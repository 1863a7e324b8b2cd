//! LSP (Language Server Protocol) backend implementation for KL

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::config::EngineConfig;
use crate::frontend::extensions::ExtensionLoader;
use crate::frontend::registry::{Registry, UnitHandle};
use crate::lsp::analysis::{self, CompletionKind};
use crate::lsp::diagnostics::unresolved_requires;
use crate::lsp::position::{position_to_offset, span_to_range};

/// Registry owner for documents opened in the editor.
const DOCUMENT_OWNER: &str = "document";

/// Document state stored by the LSP
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub handle: UnitHandle,
    pub version: i32,
}

/// KL Language Server
pub struct KlLanguageServer {
    client: Client,
    registry: Arc<Registry>,
    loader: ExtensionLoader,
    documents: Arc<RwLock<HashMap<Url, DocumentState>>>,
}

impl KlLanguageServer {
    pub fn new(client: Client) -> Self {
        Self::with_config(client, &EngineConfig::from_env())
    }

    pub fn with_config(client: Client, config: &EngineConfig) -> Self {
        Self {
            client,
            registry: Arc::new(Registry::with_config(config)),
            loader: ExtensionLoader::from_config(config),
            documents: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Re-parse a document, load its requires and publish diagnostics
    async fn analyze_document(&self, uri: &Url, source: &str, version: i32) {
        let handle = match self.registry.get_or_create(DOCUMENT_OWNER, uri.as_str(), Some(source)) {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!(uri = %uri, error = %e, "failed to register document");
                return;
            }
        };
        let unit = handle.snapshot();
        let unresolved = self.loader.load_requires(&self.registry, &unit);
        let diagnostics = unresolved_requires(&unit, &unresolved);

        {
            let mut docs = self.documents.write().await;
            docs.insert(uri.clone(), DocumentState { handle, version });
        }

        // Publish diagnostics (even if empty, to clear old ones)
        self.client
            .publish_diagnostics(uri.clone(), diagnostics, Some(version))
            .await;
    }

    async fn document(&self, uri: &Url) -> Option<UnitHandle> {
        self.documents.read().await.get(uri).map(|doc| doc.handle.clone())
    }
}

fn completion_item_kind(kind: CompletionKind) -> CompletionItemKind {
    match kind {
        CompletionKind::Keyword => CompletionItemKind::KEYWORD,
        CompletionKind::Type => CompletionItemKind::CLASS,
        CompletionKind::Struct => CompletionItemKind::STRUCT,
        CompletionKind::Function => CompletionItemKind::FUNCTION,
        CompletionKind::Operator => CompletionItemKind::OPERATOR,
        CompletionKind::Constant => CompletionItemKind::CONSTANT,
        CompletionKind::Field => CompletionItemKind::FIELD,
        CompletionKind::Method => CompletionItemKind::METHOD,
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for KlLanguageServer {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec![".".to_string()]),
                    ..Default::default()
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "klsense-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "KL language server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let source = params.text_document.text;
        let version = params.text_document.version;

        self.analyze_document(&uri, &source, version).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        // We use FULL sync, so there's only one change with the full content
        if let Some(change) = params.content_changes.into_iter().next() {
            self.analyze_document(&uri, &change.text, version).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;

        // The unit stays registered so other documents keep seeing its declarations.
        let mut docs = self.documents.write().await;
        docs.remove(&uri);

        // Clear diagnostics
        self.client.publish_diagnostics(uri, vec![], None).await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let Some(handle) = self.document(uri).await else {
            return Ok(None);
        };
        let unit = handle.snapshot();
        let offset = position_to_offset(unit.source(), position);

        let Some(info) = analysis::hover(&self.registry, &unit, offset) else {
            return Ok(None);
        };
        let range = unit
            .symbol(info.symbol)
            .map(|symbol| span_to_range(unit.source(), symbol.start(), symbol.end()));

        Ok(Some(Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value: info.to_markdown(),
            }),
            range,
        }))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let Some(handle) = self.document(uri).await else {
            return Ok(None);
        };
        let unit = handle.snapshot();
        let offset = position_to_offset(unit.source(), position);

        let items = analysis::complete(&self.registry, &unit, offset)
            .into_iter()
            .map(|item| CompletionItem {
                label: item.label,
                kind: Some(completion_item_kind(item.kind)),
                detail: item.detail,
                documentation: item.documentation.map(Documentation::String),
                ..Default::default()
            })
            .collect();

        Ok(Some(CompletionResponse::Array(items)))
    }
}
