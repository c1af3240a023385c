//! Module selection from command-line flags or a terminal prompt

use spotless_applier_core::interfaces::{ModuleSelector, SelectionResponse};
use std::io::{self, BufRead, Write};

/// Answers the module choice from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct FlagSelector {
    pub modules: Vec<String>,
    pub root: bool,
    pub all: bool,
}

impl ModuleSelector for FlagSelector {
    fn select(&self, candidates: &[String], has_root: bool) -> SelectionResponse {
        if self.root {
            if !has_root {
                tracing::warn!("--root given but the project directory is not a module");
                return SelectionResponse::cancelled();
            }
            return SelectionResponse::root();
        }

        if self.all {
            return SelectionResponse::modules(candidates.to_vec());
        }

        if !self.modules.is_empty() {
            return SelectionResponse::modules(self.modules.clone());
        }

        if has_root {
            SelectionResponse::root()
        } else {
            SelectionResponse::modules(candidates.to_vec())
        }
    }
}

/// Asks on stderr and reads the answer from stdin.
pub struct PromptSelector;

impl PromptSelector {
    /// Interpret a prompt answer.
    ///
    /// Accepts comma or space separated 1-based indices, `a` for every
    /// module and `r` for the root project. Empty input or anything
    /// unparsable cancels.
    pub fn parse_answer(answer: &str, candidates: &[String], has_root: bool) -> SelectionResponse {
        let answer = answer.trim();
        if answer.is_empty() {
            return SelectionResponse::cancelled();
        }

        match answer.to_ascii_lowercase().as_str() {
            "a" | "all" => return SelectionResponse::modules(candidates.to_vec()),
            "r" | "root" if has_root => return SelectionResponse::root(),
            _ => {}
        }

        let mut chosen = Vec::new();
        for token in answer.split(|c: char| c == ',' || c.is_whitespace()) {
            if token.is_empty() {
                continue;
            }
            match token.parse::<usize>() {
                Ok(index) if (1..=candidates.len()).contains(&index) => {
                    let name = &candidates[index - 1];
                    if !chosen.contains(name) {
                        chosen.push(name.clone());
                    }
                }
                _ => {
                    eprintln!("Invalid selection '{token}'");
                    return SelectionResponse::cancelled();
                }
            }
        }

        SelectionResponse::modules(chosen)
    }
}

impl ModuleSelector for PromptSelector {
    fn select(&self, candidates: &[String], has_root: bool) -> SelectionResponse {
        eprintln!("📦 Select modules to reformat:");
        for (i, name) in candidates.iter().enumerate() {
            eprintln!("   {}. {}", i + 1, name);
        }
        if has_root {
            eprintln!("   r. apply on the root project");
        }
        eprint!("Modules (e.g. 1,3; a = all; empty = cancel): ");
        let _ = io::stderr().flush();

        let mut answer = String::new();
        if let Err(e) = io::stdin().lock().read_line(&mut answer) {
            tracing::warn!("Failed to read selection: {}", e);
            return SelectionResponse::cancelled();
        }

        Self::parse_answer(&answer, candidates, has_root)
    }
}
