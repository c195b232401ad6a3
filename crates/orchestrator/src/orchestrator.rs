//! The assistant itself: classify, dispatch, reply.

use std::path::PathBuf;
use std::sync::Arc;

use chat_core::{Answer, InboundMessage, KnowledgeSource, OutboundMessage};
use knowledge::{
    CombinedSource, KnowledgeCache, KnowledgeConfig, QuestionKind, ResponseFormatter,
    TopicNormalizer, WebSearchSource, WikipediaSource,
};
use tracing::{debug, info, warn};

use crate::arithmetic::solve_arithmetic;
use crate::error::OrchestratorError;
use crate::intent::Intent;
use crate::profile::{parse_name, parse_preference, ProfileStore};
use crate::session::{is_continuation, SessionStore};

/// File names for the persisted documents inside the data directory.
const CACHE_FILE: &str = "conocimiento.json";
const PROFILE_FILE: &str = "perfil.json";

/// Assistant construction parameters.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Directory holding the cache and profile documents.
    pub data_dir: PathBuf,
    /// Knowledge pipeline settings.
    pub knowledge: KnowledgeConfig,
}

impl AssistantConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            knowledge: KnowledgeConfig::default(),
        }
    }

    pub fn with_knowledge(mut self, knowledge: KnowledgeConfig) -> Self {
        self.knowledge = knowledge;
        self
    }
}

/// Conversational assistant: every inbound message produces a reply.
pub struct Assistant {
    normalizer: TopicNormalizer,
    cache: KnowledgeCache,
    source: Arc<dyn KnowledgeSource>,
    formatter: ResponseFormatter,
    profile: ProfileStore,
    sessions: SessionStore,
}

impl Assistant {
    /// Build the assistant with the standard two-stage encyclopedia source
    /// and, if enabled, the web-search fallback.
    pub fn new(config: AssistantConfig) -> Result<Self, OrchestratorError> {
        let primary: Arc<dyn KnowledgeSource> =
            Arc::new(WikipediaSource::new(config.knowledge.clone())?);

        let fallback: Option<Arc<dyn KnowledgeSource>> = if config.knowledge.enable_web_fallback {
            Some(Arc::new(WebSearchSource::new(config.knowledge.clone())?))
        } else {
            None
        };

        let source = Arc::new(CombinedSource::new(primary, fallback));
        info!(source = source.name(), "knowledge source ready");

        Ok(Self::with_source(config, source))
    }

    /// Build the assistant around an externally supplied knowledge source.
    pub fn with_source(config: AssistantConfig, source: Arc<dyn KnowledgeSource>) -> Self {
        let normalizer = TopicNormalizer::new(&config.knowledge);
        let cache = KnowledgeCache::open(config.data_dir.join(CACHE_FILE));
        let formatter = ResponseFormatter::new(config.knowledge.max_display_chars);
        let profile = ProfileStore::open(config.data_dir.join(PROFILE_FILE));

        Self {
            normalizer,
            cache,
            source,
            formatter,
            profile,
            sessions: SessionStore::new(),
        }
    }

    /// Handle one inbound message. Never fails: lookup errors degrade to
    /// the not-found reply.
    pub async fn process(&self, message: &InboundMessage) -> OutboundMessage {
        let text = message.text.trim();
        let intent = Intent::classify(text);
        debug!(session = %message.session, ?intent, "classified message");

        let reply = match intent {
            Intent::Greeting => self.greet().await,
            Intent::IntroduceName => self.introduce_name(text).await,
            Intent::StatePreference => self.state_preference(text).await,
            Intent::Arithmetic => solve_arithmetic(text),
            Intent::KnowledgeQuery => self.answer_question(&message.session, text).await,
            Intent::Other => {
                if is_continuation(text) {
                    self.answer_question(&message.session, text).await
                } else {
                    self.fallback_reply(text)
                }
            }
        };

        OutboundMessage::reply_to(message, reply)
    }

    async fn greet(&self) -> String {
        match self.profile.name().await {
            Some(name) => format!(
                "¡Hola, {}! 👋 Soy Atlas. Pregúntame por un tema histórico, \
                 por ejemplo «háblame de los incas».",
                name
            ),
            None => "¡Hola! 👋 Soy Atlas. Puedes presentarte con «me llamo ...» \
                     o preguntarme por un tema histórico."
                .to_string(),
        }
    }

    async fn introduce_name(&self, text: &str) -> String {
        match parse_name(text) {
            Some(name) => {
                if let Err(e) = self.profile.set_name(&name).await {
                    warn!(error = %e, "failed to persist profile");
                }
                format!("¡Mucho gusto, {}! Lo recordaré. 😊", name)
            }
            None => "No entendí tu nombre. Prueba con «me llamo Ana».".to_string(),
        }
    }

    async fn state_preference(&self, text: &str) -> String {
        match parse_preference(text) {
            Some(preference) => {
                if let Err(e) = self.profile.add_preference(&preference).await {
                    warn!(error = %e, "failed to persist profile");
                }
                format!("¡Genial! Recordaré que te gusta {}.", preference)
            }
            None => "¿Qué es lo que te gusta? Cuéntame un poco más.".to_string(),
        }
    }

    /// The knowledge pipeline: resolve the topic, consult the cache, and
    /// only then go out to the network.
    async fn answer_question(&self, session: &str, text: &str) -> String {
        let kind = QuestionKind::classify(text);

        let topic = if is_continuation(text) {
            match self.sessions.last_topic(session).await {
                Some(previous) => previous,
                None => return self.formatter.no_topic(),
            }
        } else {
            self.normalizer.normalize(text)
        };

        if topic.is_empty() {
            return self.formatter.no_topic();
        }

        if let Some(cached) = self.cache.get(&topic).await {
            debug!(topic = %topic, "cache hit");
            self.sessions.set_last_topic(session, &topic).await;
            return self
                .formatter
                .format(&topic, &Answer::encyclopedia(cached), true, kind);
        }

        match self.source.fetch(&topic).await {
            Ok(Some(answer)) => {
                if let Err(e) = self.cache.put(&topic, &answer.text).await {
                    warn!(topic = %topic, error = %e, "failed to persist cache");
                }
                self.sessions.set_last_topic(session, &topic).await;
                self.formatter.format(&topic, &answer, false, kind)
            }
            Ok(None) => {
                debug!(topic = %topic, "no answer found");
                self.formatter.not_found(&topic)
            }
            Err(e) => {
                warn!(topic = %topic, error = %e, "knowledge lookup failed");
                self.formatter.not_found(&topic)
            }
        }
    }

    fn fallback_reply(&self, text: &str) -> String {
        let lowered = text.to_lowercase();

        if lowered.contains("cómo") || lowered.contains("como") {
            return "Buena pregunta. Si me dices el tema («háblame de los incas») \
                    puedo buscar una explicación."
                .to_string();
        }

        "No estoy seguro de haber entendido. Puedo saludarte, recordar tu nombre, \
         resolver operaciones («resolver 2+2») o contarte sobre temas históricos \
         («háblame de los incas»)."
            .to_string()
    }
}
