use std::io::Write;
use std::time::Duration;

/// Format an elapsed duration as `H:MM:SS.mmm`.
///
/// Hours are not padded and absorb everything above one hour, so long runs
/// grow the leading field instead of wrapping.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_seconds = elapsed.as_secs();

    let hours = total_seconds / 3600;
    let minutes = total_seconds / 60 % 60;
    let seconds = total_seconds % 60;
    let milliseconds = elapsed.subsec_millis();

    format!("{hours}:{minutes:02}:{seconds:02}.{milliseconds:03}")
}

/// The rendering capability the refresh loop drives.
///
/// [`crate::scheduler::run_refresh_loop`] calls [`Renderer::render_tick`] on
/// every periodic tick and [`Renderer::finish`] exactly once at termination.
pub trait Renderer {
    /// Render one periodic update of the elapsed time.
    fn render_tick(&mut self, elapsed: Duration) -> std::io::Result<()>;

    /// Render the final elapsed time when the loop terminates.
    fn finish(&mut self, elapsed: Duration) -> std::io::Result<()>;
}

/// A [`Renderer`] for interactive terminals.
///
/// Every tick overwrites the previous value in place with a carriage return
/// and no trailing newline; the single trailing newline is emitted by
/// [`Renderer::finish`].
#[derive(Debug)]
pub struct InteractiveRenderer<W> {
    out: W,
}

impl<W: Write> InteractiveRenderer<W> {
    /// Create a renderer writing to `out`.
    pub fn new(out: W) -> InteractiveRenderer<W> {
        InteractiveRenderer { out }
    }
}

impl<W: Write> Renderer for InteractiveRenderer<W> {
    fn render_tick(&mut self, elapsed: Duration) -> std::io::Result<()> {
        write!(self.out, "{}\r", format_elapsed(elapsed))?;
        self.out.flush()
    }

    fn finish(&mut self, elapsed: Duration) -> std::io::Result<()> {
        writeln!(self.out, "{}", format_elapsed(elapsed))?;
        self.out.flush()
    }
}

/// A [`Renderer`] for files and pipes: every render, the final one included,
/// is appended as a full line.
#[derive(Debug)]
pub struct StreamRenderer<W> {
    out: W,
}

impl<W: Write> StreamRenderer<W> {
    /// Create a renderer writing to `out`.
    pub fn new(out: W) -> StreamRenderer<W> {
        StreamRenderer { out }
    }
}

impl<W: Write> Renderer for StreamRenderer<W> {
    fn render_tick(&mut self, elapsed: Duration) -> std::io::Result<()> {
        writeln!(self.out, "{}", format_elapsed(elapsed))?;
        self.out.flush()
    }

    fn finish(&mut self, elapsed: Duration) -> std::io::Result<()> {
        writeln!(self.out, "{}", format_elapsed(elapsed))?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::InteractiveRenderer;
    use super::Renderer;
    use super::StreamRenderer;
    use super::format_elapsed;

    #[test]
    fn zero_formats_with_all_fields_present() {
        assert_eq!("0:00:00.000", format_elapsed(Duration::ZERO));
    }

    #[test]
    fn minutes_and_seconds_are_zero_padded() {
        let elapsed = Duration::from_millis(3_661_005);
        assert_eq!("1:01:01.005", format_elapsed(elapsed));
    }

    #[test]
    fn hours_grow_without_wrapping() {
        let elapsed = Duration::from_secs(100 * 3600);
        assert_eq!("100:00:00.000", format_elapsed(elapsed));
    }

    #[test]
    fn sub_millisecond_time_is_truncated() {
        let elapsed = Duration::new(1, 999_999);
        assert_eq!("0:00:01.000", format_elapsed(elapsed));
    }

    #[test]
    fn interactive_ticks_overwrite_in_place() {
        let mut buffer = Vec::new();
        let mut renderer = InteractiveRenderer::new(&mut buffer);

        renderer
            .render_tick(Duration::from_millis(100))
            .expect("writing to a buffer cannot fail");
        renderer
            .render_tick(Duration::from_millis(200))
            .expect("writing to a buffer cannot fail");
        renderer
            .finish(Duration::from_millis(300))
            .expect("writing to a buffer cannot fail");

        assert_eq!(
            "0:00:00.100\r0:00:00.200\r0:00:00.300\n",
            String::from_utf8(buffer).expect("renders are valid UTF-8")
        );
    }

    #[test]
    fn stream_renders_are_full_lines() {
        let mut buffer = Vec::new();
        let mut renderer = StreamRenderer::new(&mut buffer);

        renderer
            .render_tick(Duration::from_millis(100))
            .expect("writing to a buffer cannot fail");
        renderer
            .finish(Duration::from_millis(200))
            .expect("writing to a buffer cannot fail");

        assert_eq!(
            "0:00:00.100\n0:00:00.200\n",
            String::from_utf8(buffer).expect("renders are valid UTF-8")
        );
    }
}
