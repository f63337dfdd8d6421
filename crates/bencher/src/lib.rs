//! Shared inputs for the `micro-message` benchmarks.

#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    file: TestFile,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, file: TestFile) -> Self {
        Self { name, group, file }
    }

    pub fn small(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestGroup::Small, file)
    }

    pub fn large(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestGroup::Large, file)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn file(&self) -> &TestFile {
        &self.file
    }
}

/// A resource file holding one input per line.
#[derive(Debug, Copy, Clone)]
pub struct TestFile {
    file_name: &'static str,
    content: &'static str,
}

impl TestFile {
    pub const fn new(file_name: &'static str, content: &'static str) -> Self {
        Self { file_name, content }
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }

    /// Non-empty lines of the file, trailing whitespace removed.
    pub fn inputs(&self) -> impl Iterator<Item = &'static str> {
        self.content.lines().map(str::trim_end).filter(|line| !line.is_empty())
    }

    /// Total byte length of all inputs.
    pub fn input_len(&self) -> u64 {
        self.inputs().map(|input| input.len() as u64).sum()
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Small,
    Large,
}

impl TestGroup {
    /// How many headers a request benchmark churns through.
    pub fn header_count(self) -> usize {
        match self {
            TestGroup::Small => 8,
            TestGroup::Large => 64,
        }
    }
}
