use std::io::Write;

/// Where a rendered report ends up. Each call replaces whatever was shown before.
pub trait ReportView {
    fn replace(&mut self, text: &str);
}

/// Writes each report to a stream, stdout by default.
pub struct ConsoleView<W: Write> {
    out: W,
}

impl ConsoleView<std::io::Stdout> {
    pub fn stdout() -> Self {
        ConsoleView::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        ConsoleView { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportView for ConsoleView<W> {
    fn replace(&mut self, text: &str) {
        // A closed stdout (e.g. `| head`) is not worth a panic.
        let _ = writeln!(self.out, "{}", text);
        let _ = self.out.flush();
    }
}
