//! Tipos de dados para requisições e respostas do Bedrock Agent Runtime.
//!
//! A operação InvokeAgent é um POST em
//! `/agents/{agentId}/agentAliases/{agentAliasId}/sessions/{sessionId}/text`
//! com corpo JSON em camelCase. A resposta de sucesso chega como um event
//! stream da AWS; o corpo é lido inteiro e mantido como bytes crus.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Descritor da requisição: identifica o agente, o alias, a sessão e o texto
/// de entrada. Criado imediatamente antes da chamada e descartado depois.
#[derive(Debug, Clone)]
pub struct InvokeAgentRequest {
    /// Identificador do agente Bedrock.
    pub agent_id: String,
    /// Identificador do alias do agente.
    pub agent_alias_id: String,
    /// Identificador de sessão (UUID v4, único por execução).
    pub session_id: String,
    /// Texto do prompt enviado ao agente.
    pub input_text: String,
}

impl InvokeAgentRequest {
    /// Caminho REST da operação InvokeAgent para esta requisição.
    pub fn path(&self) -> String {
        format!(
            "/agents/{}/agentAliases/{}/sessions/{}/text",
            self.agent_id, self.agent_alias_id, self.session_id
        )
    }
}

/// Corpo JSON enviado no POST do InvokeAgent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeAgentBody {
    /// Texto de entrada para o agente.
    pub input_text: String,
    /// Habilita trace de raciocínio do agente (sempre falso aqui).
    pub enable_trace: bool,
    /// Estado de sessão enviado junto com a requisição.
    pub session_state: SessionState,
}

/// Estado de sessão do agente — atributos vazios nesta aplicação.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub session_attributes: HashMap<String, String>,
    pub prompt_session_attributes: HashMap<String, String>,
}

impl From<&InvokeAgentRequest> for InvokeAgentBody {
    fn from(req: &InvokeAgentRequest) -> Self {
        Self {
            input_text: req.input_text.clone(),
            enable_trace: false,
            session_state: SessionState::default(),
        }
    }
}

/// Resposta completa retornada pelo serviço.
///
/// O corpo é mantido verbatim (bytes do event stream), sem decodificação.
#[derive(Debug, Clone)]
pub struct AgentResponse {
    /// Código de status HTTP (2xx).
    pub status: u16,
    /// Cabeçalho `x-amzn-requestid`, quando presente.
    pub request_id: Option<String>,
    /// Cabeçalho `x-amz-bedrock-agent-session-id`, quando presente.
    pub session_id: Option<String>,
    /// Content-type retornado pelo serviço.
    pub content_type: Option<String>,
    /// Corpo cru da resposta.
    pub body: Vec<u8>,
}

impl AgentResponse {
    /// Corpo da resposta como texto (UTF-8 com perdas para bytes inválidos).
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Corpo de erro JSON retornado pelo serviço: `{"message": "..."}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
}
