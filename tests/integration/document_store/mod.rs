use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;
use mvi_store::{CommandHandler, Failure, Intent, Reducer, Repository, Store, UseCase};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Document {
    pub(crate) id: String,
    pub(crate) body: String,
}

/// Sample entity used across scenarios.
pub(crate) fn doc(id: &str) -> Document {
    Document {
        id: id.to_string(),
        body: format!("body of {id}"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct DocumentState {
    pub(crate) loading: bool,
    pub(crate) document: Option<Document>,
    pub(crate) revisions: Vec<String>,
    pub(crate) error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DocumentAction {
    LoadStarted,
    DocumentLoaded {
        document: Document,
        revisions: Vec<String>,
    },
    RevisionSaved {
        document: Document,
        revision: String,
    },
    Failed {
        message: String,
    },
    ClearError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DocumentCommand {
    LoadDocument { id: String },
    ReviseDocument { id: String, changes: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DocumentEffect {
    ShowToast(String),
}

pub(crate) struct DocumentReducer;

impl Reducer for DocumentReducer {
    type State = DocumentState;
    type Action = DocumentAction;
    type Effect = DocumentEffect;

    fn reduce(
        &self,
        action: DocumentAction,
        state: &DocumentState,
    ) -> (DocumentState, Vec<DocumentEffect>) {
        match action {
            DocumentAction::LoadStarted => (
                DocumentState {
                    loading: true,
                    error: None,
                    ..state.clone()
                },
                Vec::new(),
            ),
            DocumentAction::DocumentLoaded {
                document,
                revisions,
            } => (
                DocumentState {
                    loading: false,
                    document: Some(document),
                    revisions,
                    error: None,
                },
                Vec::new(),
            ),
            DocumentAction::RevisionSaved { document, revision } => {
                let mut revisions = state.revisions.clone();
                revisions.push(revision);
                (
                    DocumentState {
                        loading: false,
                        document: Some(document),
                        revisions,
                        error: None,
                    },
                    Vec::new(),
                )
            }
            DocumentAction::Failed { message } => (
                DocumentState {
                    loading: false,
                    error: Some(message.clone()),
                    ..state.clone()
                },
                vec![DocumentEffect::ShowToast(message)],
            ),
            DocumentAction::ClearError => (
                DocumentState {
                    error: None,
                    ..state.clone()
                },
                Vec::new(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReviseRequest {
    pub(crate) id: String,
    pub(crate) changes: String,
}

mockall::mock! {
    pub(crate) DocRepository {}

    #[async_trait]
    impl Repository<Document> for DocRepository {
        async fn fetch(&self, id: &str) -> Result<Document, Failure>;
        async fn save(&self, entity: Document) -> Result<Document, Failure>;
        fn list(&self) -> BoxStream<'static, Result<Document, Failure>>;
    }
}

mockall::mock! {
    pub(crate) ReviseDocumentUseCase {}

    #[async_trait]
    impl UseCase for ReviseDocumentUseCase {
        type Input = ReviseRequest;
        type Output = Document;

        async fn execute(&self, input: ReviseRequest) -> Result<Document, Failure>;
    }
}

pub(crate) struct DocumentCommandHandler<R, U> {
    repository: Arc<R>,
    revise: Arc<U>,
}

impl<R, U> DocumentCommandHandler<R, U> {
    pub(crate) fn new(repository: R, revise: U) -> Self {
        Self {
            repository: Arc::new(repository),
            revise: Arc::new(revise),
        }
    }
}

#[async_trait]
impl<R, U> CommandHandler for DocumentCommandHandler<R, U>
where
    R: Repository<Document> + 'static,
    U: UseCase<Input = ReviseRequest, Output = Document> + 'static,
{
    type Action = DocumentAction;
    type Command = DocumentCommand;

    async fn run(&self, command: DocumentCommand) -> Intent<DocumentAction, DocumentCommand> {
        match command {
            DocumentCommand::LoadDocument { id } => {
                if id.trim().is_empty() {
                    let failure = Failure::validation("document id must not be empty");
                    return Intent::Action(DocumentAction::Failed {
                        message: failure.to_string(),
                    });
                }
                match self.repository.fetch(&id).await {
                    Ok(document) => Intent::Action(DocumentAction::DocumentLoaded {
                        document,
                        revisions: Vec::new(),
                    }),
                    Err(failure) => Intent::Action(DocumentAction::Failed {
                        message: format!("Failed to load document {id}: {failure}"),
                    }),
                }
            }
            DocumentCommand::ReviseDocument { id, changes } => {
                let request = ReviseRequest {
                    id,
                    changes: changes.clone(),
                };
                match self.revise.execute(request).await {
                    Ok(document) => Intent::Action(DocumentAction::RevisionSaved {
                        document,
                        revision: changes,
                    }),
                    Err(_) => Intent::Action(DocumentAction::Failed {
                        message: "Failed to revise document".to_string(),
                    }),
                }
            }
        }
    }
}

pub(crate) type MockedDocumentStore =
    Store<DocumentReducer, DocumentCommandHandler<MockDocRepository, MockReviseDocumentUseCase>>;

pub(crate) fn spawn_document_store(
    repository: MockDocRepository,
    revise: MockReviseDocumentUseCase,
) -> MockedDocumentStore {
    Store::spawn(
        DocumentState::default(),
        DocumentReducer,
        DocumentCommandHandler::new(repository, revise),
    )
}
