use std::fmt;

#[derive(Debug, Clone)]
pub struct FmtRepeat<T>(pub T, pub usize);

impl<T: fmt::Display> fmt::Display for FmtRepeat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&FmtIter::new((0..self.1).map(|_| &self.0)), f)
    }
}

#[derive(Debug, Clone)]
pub struct FmtIter<I>(pub I);

impl<I> FmtIter<I> {
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self(iter.into_iter())
    }
}

impl<I> fmt::Display for FmtIter<I>
where
    I: Clone + Iterator,
    I::Item: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in self.0.clone() {
            fmt::Display::fmt(&i, f)?;
        }
        Ok(())
    }
}

/// A report line: `label` left-aligned in a `column`-wide field, followed by `value`.
///
/// Labels longer than `column` are written in full.
#[derive(Debug, Clone)]
pub struct FmtRow<'a, T> {
    pub label: &'a str,
    pub column: usize,
    pub value: T,
}

impl<'a, T> FmtRow<'a, T> {
    pub fn new(label: &'a str, column: usize, value: T) -> Self {
        Self {
            label,
            column,
            value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for FmtRow<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<column$}{}", self.label, self.value, column = self.column)
    }
}
