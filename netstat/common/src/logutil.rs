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

use slog::Drain;
use slog::Level;

/// Logger used by library code and tests that have no logger handed to them.
pub fn get_logger() -> slog::Logger {
    let plain = slog_term::PlainSyncDecorator::new(std::io::stderr());
    slog::Logger::root(slog_term::FullFormat::new(plain).build().fuse(), slog::o!())
}

fn level_for(debug: bool) -> Level {
    if debug { Level::Debug } else { Level::Info }
}

/// Root logger for the binary. Report text goes to stdout, so every log
/// record is written to stderr.
pub fn setup(debug: bool) -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = drain.filter_level(level_for(debug)).fuse();
    let drain = std::sync::Mutex::new(drain).fuse();
    slog::Logger::root(drain, slog::o!())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(false), Level::Info);
        assert_eq!(level_for(true), Level::Debug);
        assert!(Level::Debug.is_at_least(level_for(true)));
        assert!(!Level::Debug.is_at_least(level_for(false)));
    }
}
