//! Interface de terminal do bedrock-chat — spinner e saída colorida.
//!
//! Usa as crates `indicatif` para o spinner enquanto a requisição está em
//! andamento e `console` para estilização com cores. Sucesso é verde com
//! checkmark; cada categoria de erro imprime sua linha de diagnóstico em
//! vermelho seguida do erro subjacente em amarelo.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::bedrock::{AgentError, AgentResponse};

/// Indicador visual de um turno de conversa em andamento.
pub struct TurnProgress {
    // Spinner do indicatif.
    pb: ProgressBar,
    green: Style,
}

impl TurnProgress {
    /// Inicia o spinner com a mensagem fornecida.
    pub fn start(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("invalid template"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            pb,
            green: Style::new().green().bold(),
        }
    }

    /// Finaliza o spinner e imprime a resposta completa do agente.
    pub fn complete_ok(&self, response: &AgentResponse, verbose: bool) {
        self.pb.finish_and_clear();
        println!(
            "{} Agent responded successfully",
            self.green.apply_to("✓")
        );
        print_response(response, verbose);
    }

    /// Finaliza o spinner e imprime o diagnóstico da falha.
    pub fn complete_err(&self, err: &AgentError) {
        self.pb.finish_and_clear();
        print_failure(err);
    }
}

/// Imprime o payload da resposta verbatim, com metadados sob `--verbose`.
pub fn print_response(response: &AgentResponse, verbose: bool) {
    if verbose {
        let dim = Style::new().dim();
        println!("{}", dim.apply_to("─── Agent Response ───"));
        println!("{} {}", dim.apply_to("status:"), response.status);
        if let Some(ref id) = response.request_id {
            println!("{} {id}", dim.apply_to("request id:"));
        }
        if let Some(ref id) = response.session_id {
            println!("{} {id}", dim.apply_to("session id:"));
        }
        if let Some(ref ct) = response.content_type {
            println!("{} {ct}", dim.apply_to("content type:"));
        }
        println!("{}", dim.apply_to("──────────────────────"));
    }
    println!("{}", response.body_text());
}

/// Linha de diagnóstico por categoria, mais o erro subjacente.
pub fn print_failure(err: &AgentError) {
    let red = Style::new().red().bold();
    let yellow = Style::new().yellow();
    println!("{} {}", red.apply_to("✗"), err.diagnostic());
    println!("  {}", yellow.apply_to(err));
}
