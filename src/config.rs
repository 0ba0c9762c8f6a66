//! Configuração do bedrock-chat carregada a partir de `bedrock-chat.toml`.
//!
//! A struct [`ChatConfig`] contém os parâmetros do agente. Valores não
//! presentes no arquivo usam os literais do agente de demonstração.
//! Variáveis de ambiente têm precedência sobre o arquivo, e flags de CLI
//! têm precedência sobre tudo.

use serde::Deserialize;
use std::path::Path;

use crate::cli::Cli;
use crate::error::ChatError;

/// Configuração de nível superior carregada de `bedrock-chat.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Identificador do agente Bedrock.
    #[serde(default = "default_agent_id")]
    pub agent_id: String,

    /// Identificador do alias do agente.
    #[serde(default = "default_agent_alias_id")]
    pub agent_alias_id: String,

    /// Região AWS onde o agente está hospedado.
    #[serde(default = "default_region")]
    pub region: String,

    /// Prompt usado pelo `ask` quando nenhum é fornecido.
    #[serde(default = "default_prompt")]
    pub default_prompt: String,
}

fn default_agent_id() -> String {
    "BWLIU13QYP".to_string()
}

fn default_agent_alias_id() -> String {
    "CAX1BYK1MK".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_prompt() -> String {
    "What topics are covered in the training videos?".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            agent_id: default_agent_id(),
            agent_alias_id: default_agent_alias_id(),
            region: default_region(),
            default_prompt: default_prompt(),
        }
    }
}

impl ChatConfig {
    /// Carrega a configuração de `bedrock-chat.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir; aplica o ambiente depois.
    pub fn load() -> Result<Self, ChatError> {
        let path = Path::new("bedrock-chat.toml");
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<ChatConfig>(&contents)?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    // Variáveis de ambiente têm precedência sobre o arquivo de configuração.
    fn apply_env(&mut self) {
        for var in ["AWS_REGION", "AWS_DEFAULT_REGION"] {
            if let Ok(region) = std::env::var(var)
                && !region.is_empty()
            {
                self.region = region;
                break;
            }
        }
        if let Ok(id) = std::env::var("BEDROCK_AGENT_ID")
            && !id.is_empty()
        {
            self.agent_id = id;
        }
        if let Ok(alias) = std::env::var("BEDROCK_AGENT_ALIAS_ID")
            && !alias.is_empty()
        {
            self.agent_alias_id = alias;
        }
    }

    /// Flags de CLI têm a precedência final.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref agent_id) = cli.agent_id {
            self.agent_id = agent_id.clone();
        }
        if let Some(ref alias) = cli.agent_alias_id {
            self.agent_alias_id = alias.clone();
        }
        if let Some(ref region) = cli.region {
            self.region = region.clone();
        }
    }

    /// Rejeita identificadores vazios antes de qualquer chamada de rede.
    pub fn validate(&self) -> Result<(), ChatError> {
        if self.agent_id.is_empty() {
            return Err(ChatError::Config("agent_id must not be empty".into()));
        }
        if self.agent_alias_id.is_empty() {
            return Err(ChatError::Config(
                "agent_alias_id must not be empty".into(),
            ));
        }
        if self.region.is_empty() {
            return Err(ChatError::Config("region must not be empty".into()));
        }
        Ok(())
    }
}
