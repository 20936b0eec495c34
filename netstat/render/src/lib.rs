// Copyright (c) Facebook, Inc. and its affiliates.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![deny(clippy::all)]


const DEFAULT_SEPARATOR: &str = " ";

#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Config object for specifying how to render one column of a fixed-width
/// table.
#[derive(Default, Clone, Debug)]
pub struct RenderConfig {
    pub title: Option<String>,
    /// Pad to this many characters. The last column of a table usually has
    /// no width so lines carry no trailing padding.
    pub width: Option<usize>,
    pub align: Align,
    /// Cut values longer than width. Off for numbers, which are never
    /// shortened; they push the rest of the line right instead.
    pub truncate: bool,
    /// Printed after the column unless it is the last one. Defaults to a
    /// single space.
    pub separator: Option<String>,
}

#[derive(Default, Clone)]
pub struct RenderConfigBuilder {
    rc: RenderConfig,
}

impl RenderConfigBuilder {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn get(self) -> RenderConfig {
        self.rc
    }
    pub fn title<T: AsRef<str>>(mut self, title: T) -> Self {
        self.rc.title = Some(title.as_ref().to_owned());
        self
    }
    pub fn width(mut self, width: usize) -> Self {
        self.rc.width = Some(width);
        self
    }
    pub fn align(mut self, align: Align) -> Self {
        self.rc.align = align;
        self
    }
    pub fn truncate(mut self) -> Self {
        self.rc.truncate = true;
        self
    }
    pub fn separator<T: AsRef<str>>(mut self, separator: T) -> Self {
        self.rc.separator = Some(separator.as_ref().to_owned());
        self
    }
}

pub fn get_fixed_width(val: &str, width: usize) -> String {
    format!("{val:width$.width$}", val = val, width = width)
}

impl RenderConfig {
    pub fn get_title(&self) -> &str {
        self.title.as_deref().unwrap_or("unknown")
    }

    pub fn get_separator(&self) -> &str {
        self.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR)
    }

    pub fn render_title(&self) -> String {
        self.render(self.get_title())
    }

    pub fn render(&self, val: &str) -> String {
        match (self.width, self.align) {
            (None, _) => val.to_owned(),
            (Some(width), _) if self.truncate && val.chars().count() > width => {
                get_fixed_width(val, width)
            }
            (Some(width), Align::Left) => format!("{val:<width$}", val = val, width = width),
            (Some(width), Align::Right) => format!("{val:>width$}", val = val, width = width),
        }
    }
}

fn render_line<'a, I>(configs: &[RenderConfig], cells: I) -> String
where
    I: Iterator<Item = &'a str>,
{
    let mut line = String::new();
    for (i, (config, cell)) in configs.iter().zip(cells).enumerate() {
        line.push_str(&config.render(cell));
        if i + 1 < configs.len() {
            line.push_str(config.get_separator());
        }
    }
    line.push('\n');
    line
}

pub fn render_title_line(configs: &[RenderConfig]) -> String {
    render_line(configs, configs.iter().map(|c| c.get_title()))
}

/// Renders one row. `cells` lines up with `configs`; extra cells are ignored.
pub fn render_row<S: AsRef<str>>(configs: &[RenderConfig], cells: &[S]) -> String {
    render_line(configs, cells.iter().map(|c| c.as_ref()))
}

/// Concatenates the letter of every set bit, in table order.
pub fn flag_letters(bits: u32, table: &[(u32, char)]) -> String {
    table
        .iter()
        .filter(|(bit, _)| bits & bit == *bit)
        .map(|(_, letter)| *letter)
        .collect()
}
