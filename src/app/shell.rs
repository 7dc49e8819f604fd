use crate::app::report::{self, OutputFormat};
use crate::core::session::{AuthenticatedUser, CalculatorSession};
use crate::core::{CredentialVerifier, RecordStore};
use crate::utils::error::Result;
use std::io::{BufRead, Write};

/// Line-oriented login + calculation loop over any reader/writer pair.
pub struct InteractiveShell<'a, V: CredentialVerifier, S: RecordStore, R: BufRead, W: Write> {
    session: &'a CalculatorSession<V, S>,
    input: R,
    output: W,
}

impl<'a, V, S, R, W> InteractiveShell<'a, V, S, R, W>
where
    V: CredentialVerifier,
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    pub fn new(session: &'a CalculatorSession<V, S>, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    /// Runs until the user quits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        let Some(user) = self.login_loop()? else {
            writeln!(self.output)?;
            return Ok(());
        };

        writeln!(self.output, "Tax Calculator - {}", user.username())?;
        writeln!(
            self.output,
            "Type 'history' to list saved calculations, 'quit' to exit."
        )?;

        while self.calculate_once(&user).await? {}

        writeln!(self.output, "Goodbye.")?;
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn login_loop(&mut self) -> Result<Option<AuthenticatedUser>> {
        loop {
            let Some(username) = self.prompt("Username")? else {
                return Ok(None);
            };
            let Some(password) = self.prompt("Password")? else {
                return Ok(None);
            };

            match self.session.login(&username, &password) {
                Ok(user) => return Ok(Some(user)),
                Err(e) => writeln!(self.output, "{}", e.user_friendly_message())?,
            }
        }
    }

    /// One pass of the form. Returns `false` when the loop should stop.
    async fn calculate_once(&mut self, user: &AuthenticatedUser) -> Result<bool> {
        let Some(income) = self.prompt("Income")? else {
            return Ok(false);
        };

        match income.trim() {
            "quit" | "exit" => return Ok(false),
            "history" => {
                match self.session.history(user).await {
                    Ok(calculations) => {
                        report::write_history(&mut self.output, &calculations, OutputFormat::Table)?
                    }
                    Err(e) => writeln!(self.output, "{}", e.user_friendly_message())?,
                }
                return Ok(true);
            }
            _ => {}
        }

        let Some(deductions) = self.prompt("Deductions")? else {
            return Ok(false);
        };

        match self.session.submit(user, &income, &deductions).await {
            Ok(outcome) => report::write_outcome(&mut self.output, &outcome)?,
            Err(e) => {
                tracing::debug!("Rejected form input: {}", e);
                writeln!(self.output, "{}", e.user_friendly_message())?;
            }
        }
        Ok(true)
    }
}
