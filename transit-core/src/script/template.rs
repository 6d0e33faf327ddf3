// Template scanning
// Splits a template into literal text and positional placeholders

/// A piece of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    /// The k-th placeholder, counted from zero
    Placeholder(usize),
}

/// Iterator over the segments of a template, left to right
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a str,
    marker: char,
    index: usize,
    pending_placeholder: bool,
}

pub fn segments(template: &str, marker: char) -> Segments<'_> {
    Segments {
        rest: template,
        marker,
        index: 0,
        pending_placeholder: false,
    }
}

/// Number of placeholders in `template`
pub fn placeholder_count(template: &str, marker: char) -> usize {
    template.matches(marker).count()
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending_placeholder {
            self.pending_placeholder = false;
            let index = self.index;
            self.index += 1;
            return Some(Segment::Placeholder(index));
        }

        if self.rest.is_empty() {
            return None;
        }

        match self.rest.find(self.marker) {
            Some(0) => {
                self.rest = &self.rest[self.marker.len_utf8()..];
                let index = self.index;
                self.index += 1;
                Some(Segment::Placeholder(index))
            }
            Some(pos) => {
                let literal = &self.rest[..pos];
                self.rest = &self.rest[pos + self.marker.len_utf8()..];
                self.pending_placeholder = true;
                Some(Segment::Literal(literal))
            }
            None => {
                let literal = self.rest;
                self.rest = "";
                Some(Segment::Literal(literal))
            }
        }
    }
}
