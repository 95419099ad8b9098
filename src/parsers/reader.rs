//! # 状态机行读取器
//!
//! 将逐行文本交给当前激活的解析状态处理。
//!
//! ## 生命周期
//! ```text
//! start()  -> 初始状态 enter
//! feed()   -> 当前状态 consume_line（可返回 Transition::Goto 切换状态）
//! finish() -> 当前状态 exit（流结束不会触发 consume_line，必须显式调用）
//! ```
//! `read_lines` / `read_file` 封装了完整流程，并保证出错时也会执行 `finish`。
//!
//! ## 依赖关系
//! - 被 `parsers/bands_data.rs`, `parsers/bands_out.rs`, `parsers/scf_out.rs` 使用
//! - 无外部模块依赖

use crate::error::{BandsError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// 状态处理一行后的去向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// 保持当前状态
    Stay,
    /// 切换到指定名称的状态
    Goto(&'static str),
}

/// 解析状态
///
/// `C` 为读取器持有的输出上下文，状态把结果写入其中。
/// 缓冲区只在成对的 `enter` / `exit` 之间有效。
pub trait ParserState<C> {
    fn enter(&mut self, _ctx: &mut C) -> Result<()> {
        Ok(())
    }

    fn consume_line(&mut self, line: &str, ctx: &mut C) -> Result<Transition>;

    fn exit(&mut self, _ctx: &mut C) -> Result<()> {
        Ok(())
    }
}

/// 多状态行读取器
pub struct StatefulReader<C> {
    states: HashMap<&'static str, Box<dyn ParserState<C>>>,
    start_state: &'static str,
    current: &'static str,
    active: bool,
    current_line: String,
    line_number: usize,
    context: C,
}

impl<C> StatefulReader<C> {
    /// 由 (名称, 状态) 列表和初始状态名创建
    pub fn new(
        states: Vec<(&'static str, Box<dyn ParserState<C>>)>,
        start_state: &'static str,
        context: C,
    ) -> Result<Self> {
        let states: HashMap<_, _> = states.into_iter().collect();
        if !states.contains_key(start_state) {
            return Err(BandsError::UnknownState(start_state.to_string()));
        }

        Ok(StatefulReader {
            states,
            start_state,
            current: start_state,
            active: false,
            current_line: String::new(),
            line_number: 0,
            context,
        })
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }

    /// 回到初始状态并调用其 `enter`
    pub fn start(&mut self) -> Result<()> {
        if self.active {
            self.finish()?;
        }
        self.current = self.start_state;
        self.current_line.clear();
        self.line_number = 0;
        self.enter_current()?;
        self.active = true;
        Ok(())
    }

    /// 输入一行文本（未启动时自动 `start`）
    pub fn feed(&mut self, line: &str) -> Result<()> {
        if !self.active {
            self.start()?;
        }

        self.current_line.clear();
        self.current_line.push_str(line.trim_end_matches(['\n', '\r']));
        self.line_number += 1;

        let name = self.current;
        let state = self
            .states
            .get_mut(name)
            .ok_or_else(|| BandsError::UnknownState(name.to_string()))?;
        let transition = state
            .consume_line(&self.current_line, &mut self.context)
            .map_err(|e| BandsError::AtLine {
                line: self.line_number,
                source: Box::new(e),
            })?;

        if let Transition::Goto(next) = transition {
            self.transition(next)?;
        }
        Ok(())
    }

    /// 切换状态：旧状态 `exit`，新状态 `enter`
    pub fn transition(&mut self, next: &'static str) -> Result<()> {
        if !self.states.contains_key(next) {
            return Err(BandsError::UnknownState(next.to_string()));
        }
        if self.active {
            self.exit_current()?;
        }
        self.current = next;
        self.enter_current()?;
        self.active = true;
        Ok(())
    }

    /// 显式结束：调用当前状态的 `exit`
    pub fn finish(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.exit_current()
    }

    /// 读取任意 `BufRead` 来源的全部行，随后 `finish`
    pub fn read_lines<R: BufRead>(&mut self, source: R) -> Result<()> {
        self.start()?;
        let fed = self.feed_all(source);
        let finished = self.finish();
        fed.and(finished)
    }

    /// 打开文件并读取全部行
    pub fn read_file(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path).map_err(|e| BandsError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        self.read_lines(BufReader::new(file)).map_err(|e| match e {
            BandsError::FileReadError { source, .. } => BandsError::FileReadError {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    fn feed_all<R: BufRead>(&mut self, source: R) -> Result<()> {
        for line in source.lines() {
            let line = line.map_err(|e| BandsError::FileReadError {
                path: String::from("<stream>"),
                source: e,
            })?;
            self.feed(&line)?;
        }
        Ok(())
    }

    fn enter_current(&mut self) -> Result<()> {
        let name = self.current;
        let state = self
            .states
            .get_mut(name)
            .ok_or_else(|| BandsError::UnknownState(name.to_string()))?;
        state.enter(&mut self.context)
    }

    fn exit_current(&mut self) -> Result<()> {
        let name = self.current;
        let state = self
            .states
            .get_mut(name)
            .ok_or_else(|| BandsError::UnknownState(name.to_string()))?;
        state.exit(&mut self.context)
    }
}

/// 解析浮点数记号
pub fn parse_f64(token: &str) -> Result<f64> {
    token.parse::<f64>().map_err(|_| BandsError::InvalidNumber {
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 记录生命周期事件的上下文
    #[derive(Default)]
    struct Log {
        events: Vec<String>,
    }

    struct Echo {
        name: &'static str,
        switch_on: &'static str,
        target: &'static str,
    }

    impl ParserState<Log> for Echo {
        fn enter(&mut self, ctx: &mut Log) -> Result<()> {
            ctx.events.push(format!("enter {}", self.name));
            Ok(())
        }

        fn consume_line(&mut self, line: &str, ctx: &mut Log) -> Result<Transition> {
            if line == "bad" {
                return Err(BandsError::InvalidNumber {
                    token: line.to_string(),
                });
            }
            ctx.events.push(format!("{} {}", self.name, line));
            if line == self.switch_on {
                Ok(Transition::Goto(self.target))
            } else {
                Ok(Transition::Stay)
            }
        }

        fn exit(&mut self, ctx: &mut Log) -> Result<()> {
            ctx.events.push(format!("exit {}", self.name));
            Ok(())
        }
    }

    fn two_state_reader() -> StatefulReader<Log> {
        StatefulReader::new(
            vec![
                (
                    "a",
                    Box::new(Echo {
                        name: "a",
                        switch_on: "go-b",
                        target: "b",
                    }) as Box<dyn ParserState<Log>>,
                ),
                (
                    "b",
                    Box::new(Echo {
                        name: "b",
                        switch_on: "go-a",
                        target: "a",
                    }) as Box<dyn ParserState<Log>>,
                ),
            ],
            "a",
            Log::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_unknown_start_state() {
        let result: Result<StatefulReader<Log>> =
            StatefulReader::new(vec![], "missing", Log::default());
        assert!(matches!(result, Err(BandsError::UnknownState(_))));
    }

    #[test]
    fn test_lifecycle_and_transitions() {
        let mut reader = two_state_reader();
        let input = "x\ngo-b\ny\n";
        reader.read_lines(input.as_bytes()).unwrap();

        assert_eq!(
            reader.context().events,
            vec!["enter a", "a x", "a go-b", "exit a", "enter b", "b y", "exit b"]
        );
        assert_eq!(reader.current, "b");
        assert_eq!(reader.current_line, "y");
        assert_eq!(reader.line_number, 3);
        assert!(!reader.active);
    }

    #[test]
    fn test_feed_without_finish_leaves_state_open() {
        let mut reader = two_state_reader();
        reader.feed("x").unwrap();
        assert!(reader.active);
        assert_eq!(reader.context().events, vec!["enter a", "a x"]);

        reader.finish().unwrap();
        reader.finish().unwrap();
        assert_eq!(reader.context().events, vec!["enter a", "a x", "exit a"]);
    }

    #[test]
    fn test_explicit_transition_to_unknown_state() {
        let mut reader = two_state_reader();
        reader.start().unwrap();
        assert!(matches!(
            reader.transition("nowhere"),
            Err(BandsError::UnknownState(_))
        ));
        assert_eq!(reader.current, "a");
    }

    #[test]
    fn test_parse_error_reports_line_and_still_finishes() {
        let mut reader = two_state_reader();
        let err = reader.read_lines("x\nbad\ny\n".as_bytes()).unwrap_err();

        match &err {
            BandsError::AtLine { line, .. } => assert_eq!(*line, 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(err.root(), BandsError::InvalidNumber { .. }));
        // 出错后不再继续读取，但状态仍被关闭
        assert_eq!(reader.context().events, vec!["enter a", "a x", "exit a"]);
    }

    #[test]
    fn test_crlf_stripped() {
        let mut reader = two_state_reader();
        reader.read_lines("x\r\n".as_bytes()).unwrap();
        assert_eq!(reader.current_line, "x");
    }

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64("-1.25").unwrap(), -1.25);
        assert!(matches!(
            parse_f64("abc"),
            Err(BandsError::InvalidNumber { .. })
        ));
    }
}
