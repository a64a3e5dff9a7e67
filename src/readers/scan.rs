use serde::Deserialize;

/// Recognizes the column-header line of an engine table.
///
/// The labels are version-sensitive, so they can be replaced from the run
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPattern {
    pub first: String,
    pub second: String,
    /// `first` must start the trimmed line instead of appearing anywhere.
    pub anchored: bool,
    /// Lines from the header to the first data row.
    pub skip: usize,
}

/// Header labels as written in a run config: `["Level", "Z(m)"]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HeaderLabels(pub String, pub String);

impl HeaderPattern {
    /// Flux.txt: header has `Level` and `Z(m)`, followed by a units line.
    pub fn flux() -> Self {
        Self {
            first: "Level".to_string(),
            second: "Z(m)".to_string(),
            anchored: false,
            skip: 2,
        }
    }

    /// LUM_vsVZA.txt: header starts with `VZA` and names `SCA_ANG`.
    pub fn vza() -> Self {
        Self {
            first: "VZA".to_string(),
            second: "SCA_ANG".to_string(),
            anchored: true,
            skip: 1,
        }
    }

    pub fn with_labels(mut self, labels: &HeaderLabels) -> Self {
        self.first = labels.0.clone();
        self.second = labels.1.clone();
        self
    }

    pub fn matches(&self, line: &str) -> bool {
        let first = if self.anchored {
            line.trim().starts_with(&self.first)
        } else {
            line.contains(&self.first)
        };
        first && line.contains(&self.second)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Seeking,
    Found { header_line: usize },
    Streaming { data_start: usize },
    /// No header anywhere: data is assumed to start at line 0.
    Fallback,
}

impl ScanState {
    /// First data line, once the scan has ended.
    pub fn data_start(&self) -> Option<usize> {
        match self {
            ScanState::Streaming { data_start } => Some(*data_start),
            ScanState::Fallback => Some(0),
            _ => None,
        }
    }
}

/// Line-by-line header search. Only the first matching line counts.
#[derive(Debug)]
pub struct HeaderScan<'a> {
    pattern: &'a HeaderPattern,
    state: ScanState,
}

impl<'a> HeaderScan<'a> {
    pub fn new(pattern: &'a HeaderPattern) -> Self {
        Self {
            pattern,
            state: ScanState::Seeking,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn push(&mut self, index: usize, line: &str) -> ScanState {
        self.state = match self.state {
            ScanState::Seeking if self.pattern.matches(line) => {
                if self.pattern.skip == 0 {
                    ScanState::Streaming { data_start: index }
                } else {
                    ScanState::Found { header_line: index }
                }
            }
            ScanState::Found { header_line } if index >= header_line + self.pattern.skip => {
                ScanState::Streaming {
                    data_start: header_line + self.pattern.skip,
                }
            }
            state => state,
        };
        self.state
    }

    /// Ends the scan at end of input.
    pub fn finish(self) -> ScanState {
        match self.state {
            ScanState::Seeking => ScanState::Fallback,
            // header was among the last lines: no data follows
            ScanState::Found { header_line } => ScanState::Streaming {
                data_start: header_line + self.pattern.skip,
            },
            state => state,
        }
    }
}

/// Runs a [`HeaderScan`] over `lines` and returns its terminal state.
pub fn scan_lines<'l, I>(pattern: &HeaderPattern, lines: I) -> ScanState
where
    I: IntoIterator<Item = &'l str>,
{
    let mut scan = HeaderScan::new(pattern);
    for (index, line) in lines.into_iter().enumerate() {
        if let ScanState::Streaming { .. } = scan.push(index, line) {
            break;
        }
    }
    scan.finish()
}
