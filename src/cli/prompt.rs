//! Lectura de la entrada del usuario

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use colored::*;

use car_registry::components::modal::{Key, ModalEvent};

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Leer una línea sin el salto final. EOF es un error `UnexpectedEof`.
    pub fn ask(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{}", label.bright_yellow())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Igual que `ask`, pero una línea vacía conserva el valor actual
    pub fn ask_with_default(&mut self, label: &str, current: &str) -> io::Result<String> {
        let answer = self.ask(&format!("{} [{}]: ", label, current))?;
        if answer.is_empty() {
            Ok(current.to_string())
        } else {
            Ok(answer)
        }
    }

    pub fn ask_yes_no(&mut self, label: &str, current: bool) -> io::Result<bool> {
        let shown = if current { "y" } else { "n" };
        let answer = self.ask_with_default(label, shown)?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

/// Respuesta a un modal de confirmación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAnswer {
    Confirm,
    Cancel,
    Event(ModalEvent),
}

pub fn parse_confirm_answer(answer: &str) -> ConfirmAnswer {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => ConfirmAnswer::Confirm,
        "esc" => ConfirmAnswer::Event(ModalEvent::KeyDown(Key::Escape)),
        _ => ConfirmAnswer::Cancel,
    }
}
