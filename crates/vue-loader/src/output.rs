//! Output buffering and block capture.
//!
//! Template code writes into an [`OutputBuffer`]. Capturing a block runs it
//! and hands back what it produced without leaving that text in the buffer.
//! Captures nest: an inner capture only ever removes text written after its
//! own start, so the outer capture still sees a consistent buffer.

/// Accumulates rendered text in a stack of frames.
///
/// Writes go to the top frame. Most engines share a single frame; HAML-like
/// capture opens a fresh frame per block.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    frames: Vec<String>,
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputBuffer {
    /// Create an empty buffer with one frame.
    pub fn new() -> Self {
        Self {
            frames: vec![String::new()],
        }
    }

    fn top(&mut self) -> &mut String {
        if self.frames.is_empty() {
            self.frames.push(String::new());
        }
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Append text to the current frame.
    pub fn write(&mut self, text: &str) {
        self.top().push_str(text);
    }

    /// Length in bytes of the current frame.
    pub fn len(&self) -> usize {
        self.frames.last().map_or(0, String::len)
    }

    /// Check if the current frame is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text of the current frame.
    pub fn as_str(&self) -> &str {
        self.frames.last().map_or("", String::as_str)
    }

    /// Number of open frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Remove and return everything written to the current frame after `mark`.
    ///
    /// A mark past the end (or off a char boundary) yields an empty string.
    pub fn split_off(&mut self, mark: usize) -> String {
        let top = self.top();
        if mark >= top.len() || !top.is_char_boundary(mark) {
            return String::new();
        }
        top.split_off(mark)
    }

    /// Open a new frame.
    pub fn push_frame(&mut self) {
        self.frames.push(String::new());
    }

    /// Close the current frame and return its text.
    ///
    /// The base frame is never removed; popping it drains it instead.
    pub fn pop_frame(&mut self) -> String {
        if self.frames.len() > 1 {
            self.frames.pop().unwrap_or_default()
        } else {
            std::mem::take(self.top())
        }
    }

    /// Drain the whole buffer, joining any open frames.
    pub fn take(&mut self) -> String {
        let text = self.frames.concat();
        self.frames = vec![String::new()];
        text
    }
}

/// Anything that owns an output buffer blocks can write into.
pub trait OutputSink {
    /// The buffer template code is currently writing to.
    fn output(&mut self) -> &mut OutputBuffer;
}

impl OutputSink for OutputBuffer {
    fn output(&mut self) -> &mut OutputBuffer {
        self
    }
}

/// How an engine hands block output back to a helper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputStyle {
    /// Blocks append to one shared buffer; capture slices from a saved
    /// position.
    ErbLike,
    /// Blocks render into a nested buffer frame that capture pops.
    HamlLike,
    /// Blocks return their text; nothing is buffered.
    #[default]
    Generic,
}

impl OutputStyle {
    /// Run `block` and return the text it produced.
    ///
    /// For buffered styles the block's return value is used only when it
    /// wrote nothing to the buffer.
    pub fn capture<H, F>(self, host: &mut H, block: F) -> String
    where
        H: OutputSink + ?Sized,
        F: FnOnce(&mut H) -> String,
    {
        match self {
            Self::ErbLike => {
                let mark = host.output().len();
                let returned = block(host);
                let written = host.output().split_off(mark);
                if written.is_empty() {
                    returned
                } else {
                    written
                }
            }
            Self::HamlLike => {
                host.output().push_frame();
                let returned = block(host);
                let written = host.output().pop_frame();
                if written.is_empty() {
                    returned
                } else {
                    written
                }
            }
            Self::Generic => block(host),
        }
    }

    /// Place helper output.
    ///
    /// Buffered styles append the text and return `None`; the generic style
    /// hands the text back for the caller to place.
    pub fn emit<H>(self, host: &mut H, text: String) -> Option<String>
    where
        H: OutputSink + ?Sized,
    {
        match self {
            Self::ErbLike | Self::HamlLike => {
                host.output().write(&text);
                None
            }
            Self::Generic => Some(text),
        }
    }

    /// Get the style as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ErbLike => "erb-like",
            Self::HamlLike => "haml-like",
            Self::Generic => "generic",
        }
    }
}

impl std::fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_erb_capture_removes_block_text() {
        let mut out = OutputBuffer::new();
        out.write("<p>before</p>");
        let captured = OutputStyle::ErbLike.capture(&mut out, |buf| {
            buf.write("inner");
            String::new()
        });
        assert_eq!(captured, "inner");
        assert_eq!(out.as_str(), "<p>before</p>");
    }

    #[test]
    fn test_erb_capture_falls_back_to_return_value() {
        let mut out = OutputBuffer::new();
        let captured = OutputStyle::ErbLike.capture(&mut out, |_| "returned".to_string());
        assert_eq!(captured, "returned");
        assert!(out.is_empty());
    }

    #[test]
    fn test_nested_erb_capture_restores_outer_position() {
        let mut out = OutputBuffer::new();
        out.write("page:");
        let outer = OutputStyle::ErbLike.capture(&mut out, |buf| {
            buf.write("a");
            let inner = OutputStyle::ErbLike.capture(buf, |buf| {
                buf.write("b");
                String::new()
            });
            buf.write(&format!("[{}]", inner));
            buf.write("c");
            String::new()
        });
        assert_eq!(outer, "a[b]c");
        assert_eq!(out.as_str(), "page:");
    }

    #[test]
    fn test_haml_capture_uses_frames() {
        let mut out = OutputBuffer::new();
        out.write("page:");
        let captured = OutputStyle::HamlLike.capture(&mut out, |buf| {
            assert_eq!(buf.depth(), 2);
            assert!(buf.is_empty());
            buf.write("inner");
            String::new()
        });
        assert_eq!(captured, "inner");
        assert_eq!(out.depth(), 1);
        assert_eq!(out.as_str(), "page:");
    }

    #[test]
    fn test_generic_capture_ignores_buffer() {
        let mut out = OutputBuffer::new();
        let captured = OutputStyle::Generic.capture(&mut out, |buf| {
            buf.write("stays");
            "returned".to_string()
        });
        assert_eq!(captured, "returned");
        assert_eq!(out.as_str(), "stays");
    }

    #[test]
    fn test_emit() {
        let mut out = OutputBuffer::new();
        assert_eq!(OutputStyle::ErbLike.emit(&mut out, "x".into()), None);
        assert_eq!(OutputStyle::HamlLike.emit(&mut out, "y".into()), None);
        assert_eq!(
            OutputStyle::Generic.emit(&mut out, "z".into()),
            Some("z".to_string())
        );
        assert_eq!(out.take(), "xy");
    }

    #[test]
    fn test_split_off_past_end() {
        let mut out = OutputBuffer::new();
        out.write("ab");
        assert_eq!(out.split_off(5), "");
        assert_eq!(out.as_str(), "ab");
    }
}
