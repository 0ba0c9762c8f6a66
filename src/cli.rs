//! Interface de linha de comando do bedrock-chat baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (ask, chat, status)
//! e flags globais (--agent-id, --agent-alias-id, --region, --verbose).

use clap::{Parser, Subcommand};

/// bedrock-chat — cliente de terminal para agentes Amazon Bedrock.
#[derive(Debug, Parser)]
#[command(name = "bedrock-chat", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Identificador do agente Bedrock.
    #[arg(long, global = true)]
    pub agent_id: Option<String>,

    /// Identificador do alias do agente.
    #[arg(long, global = true)]
    pub agent_alias_id: Option<String>,

    /// Região AWS onde o agente está hospedado.
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Habilita saída detalhada (metadados da resposta).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Envia um único prompt ao agente e imprime a resposta.
    Ask {
        /// Texto do prompt; usa o prompt padrão configurado se omitido.
        prompt: Option<String>,
    },

    /// Sessão de chat interativa com o agente (mesma sessão entre turnos).
    Chat {
        /// Exporta a transcrição da conversa para um arquivo JSON ao sair.
        #[arg(long)]
        export: Option<String>,
    },

    /// Mostra o agente, alias e região efetivos, sem chamada de rede.
    Status,
}
