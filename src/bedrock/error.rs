//! Tipos de erro para o cliente do Bedrock Agent Runtime.
//!
//! Define [`AgentError`] com uma variante por categoria de falha da API
//! (not-found, access-denied, validation, throttling e o balde genérico)
//! mais falhas locais (credenciais, assinatura, rede). Usa `thiserror` para
//! derivar `Display` e `Error` a partir dos atributos `#[error(...)]`.

use thiserror::Error;

/// Erros que podem ocorrer ao invocar um agente Bedrock.
///
/// As quatro primeiras variantes correspondem às exceções nomeadas do
/// serviço; [`Api`](AgentError::Api) cobre qualquer outro status HTTP.
/// Nenhuma delas é retentada — toda falha é terminal para a chamada.
#[derive(Debug, Error)]
pub enum AgentError {
    /// O serviço retornou `ResourceNotFoundException` (agente ou alias inválido).
    #[error("agent or alias not found: {0}")]
    NotFound(String),

    /// O serviço retornou `AccessDeniedException` (permissões IAM insuficientes).
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// O serviço retornou `ValidationException` (requisição malformada).
    #[error("validation error: {0}")]
    Validation(String),

    /// O serviço retornou `ThrottlingException` (HTTP 429). Sem retentativa.
    #[error("request throttled: {0}")]
    Throttled(String),

    /// Qualquer outro erro HTTP retornado pelo serviço.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Nenhuma credencial AWS pôde ser resolvida do ambiente.
    #[error("could not resolve AWS credentials: {0}")]
    Credentials(String),

    /// Falha ao assinar a requisição com SigV4.
    #[error("request signing failed: {0}")]
    Signing(String),

    /// Falha ao serializar o corpo da requisição.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// Falha de rede subjacente (DNS, conexão recusada, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl AgentError {
    /// Classifica uma resposta de erro HTTP em uma variante.
    ///
    /// O cabeçalho `x-amzn-errortype` tem precedência (ele carrega o nome da
    /// exceção, às vezes com sufixo `:uri`); o status HTTP é o fallback.
    pub fn classify(status: u16, error_type: Option<&str>, message: String) -> Self {
        let name = error_type
            .map(|t| t.split([':', '#']).next().unwrap_or(t).trim())
            .unwrap_or("");

        match name {
            "ResourceNotFoundException" => return Self::NotFound(message),
            "AccessDeniedException" => return Self::AccessDenied(message),
            "ValidationException" => return Self::Validation(message),
            "ThrottlingException" => return Self::Throttled(message),
            _ => {}
        }

        match status {
            404 => Self::NotFound(message),
            403 => Self::AccessDenied(message),
            400 => Self::Validation(message),
            429 => Self::Throttled(message),
            _ => Self::Api { status, message },
        }
    }

    /// Linha de diagnóstico para o usuário, uma por categoria.
    pub fn diagnostic(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "Agent or alias not found. Check the agent and alias IDs.",
            Self::AccessDenied(_) => "Access denied. Check your IAM permissions.",
            Self::Validation(_) => "Validation error. Check the request format.",
            Self::Throttled(_) => "Request throttled. Try again in a moment.",
            _ => "Unexpected error.",
        }
    }
}
