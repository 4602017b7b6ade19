/// Default width of one indentation step, in spaces.
pub const INDENT_SIZE: usize = 2;

/// `count` indentation steps of `size` spaces each. Zero in either yields "".
pub fn indentation(count: usize, size: usize) -> String {
    " ".repeat(count.saturating_mul(size))
}
