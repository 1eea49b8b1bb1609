use std::io::Write;

use bb_types::{BbResult, Problem};

/// Prints one line per finished problem.
pub struct ProgressPrinter<W> {
    out: W,
    total: usize,
    printed: usize,
}

impl<W: Write> ProgressPrinter<W> {
    pub fn new(out: W, total: usize) -> Self {
        Self {
            out,
            total,
            printed: 0,
        }
    }

    /// Writes the line for `problem`; `last` marks the final problem of the suite.
    pub fn print(&mut self, problem: &dyn Problem, last: bool) -> BbResult<()> {
        let best = problem
            .best_observed_value()
            .map(|v| format!("{v:.4e}"))
            .unwrap_or_else(|| "-".to_string());
        write!(
            self.out,
            "[{:>width$}/{}] {} evals={} best={}",
            problem.info().index + 1,
            self.total,
            problem.info().id,
            problem.evaluations(),
            best,
            width = self.total.to_string().len()
        )?;
        if last {
            write!(self.out, " done")?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        self.printed += 1;
        Ok(())
    }

    pub fn printed(&self) -> usize {
        self.printed
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
