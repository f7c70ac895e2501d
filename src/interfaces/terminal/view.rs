use crate::domain::loan::Loan;
use crate::domain::projection::Projection;
use serde_json::Value;
use std::io::{self, Write};

pub const PAGE_TITLE: &str = "Admin - Easycredit";
pub const CARD_TITLE: &str = "Préstamos por validar";

pub const LOAD_FAILED_TITLE: &str = "Advertencia";
pub const LOAD_FAILED_SUBTITLE: &str = "No se logró cargar préstamos por validar";
pub const EMPTY_TITLE: &str = "Préstamos vacío";
pub const EMPTY_SUBTITLE: &str = "No se tienen préstamos por validar";

/// What the screen shows under the card title.
#[derive(Debug, Clone, PartialEq)]
pub enum Body<'a> {
    Nothing,
    Loading,
    Notice {
        title: &'static str,
        subtitle: &'static str,
    },
    Loans(&'a [Loan]),
}

impl<'a> Body<'a> {
    /// Loading wins over error, error over data.
    pub fn of(projection: &'a Projection) -> Self {
        if projection.loading {
            return Body::Loading;
        }
        if projection.error {
            return Body::Notice {
                title: LOAD_FAILED_TITLE,
                subtitle: LOAD_FAILED_SUBTITLE,
            };
        }
        match projection.pending_loans.as_deref() {
            Some([]) => Body::Notice {
                title: EMPTY_TITLE,
                subtitle: EMPTY_SUBTITLE,
            },
            Some(loans) => Body::Loans(loans),
            None => Body::Nothing,
        }
    }
}

/// Writes the admin screen as plain text.
pub struct AdminView<W: Write> {
    writer: W,
}

impl<W: Write> AdminView<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn render(&mut self, projection: &Projection) -> io::Result<()> {
        writeln!(self.writer, "{PAGE_TITLE}")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "== {CARD_TITLE} ==")?;

        match Body::of(projection) {
            Body::Nothing => {}
            Body::Loading => writeln!(self.writer, "Cargando...")?,
            Body::Notice { title, subtitle } => {
                writeln!(self.writer, "{title}")?;
                writeln!(self.writer, "  {subtitle}")?;
            }
            Body::Loans(loans) => {
                for loan in loans {
                    self.render_loan(loan)?;
                }
            }
        }
        self.writer.flush()
    }

    fn render_loan(&mut self, loan: &Loan) -> io::Result<()> {
        write!(self.writer, "- {}", loan.id)?;
        for (key, value) in &loan.attributes {
            match value {
                Value::String(text) => write!(self.writer, "  {key}={text}")?,
                other => write!(self.writer, "  {key}={other}")?,
            }
        }
        writeln!(self.writer)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
