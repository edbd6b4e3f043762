//! Three nested two-iteration loops that print where each task runs.
//!
//! Under depth-first the output reads like the source; breadth-first and
//! random show how far the same loops can be reordered.

use std::cell::RefCell;
use std::rc::Rc;

use loopweave_core::{ScheduleError, Scheduler};

/// Collects lines and hands each one to `on_line` as soon as its task runs.
#[derive(Clone)]
struct Output {
    lines: Rc<RefCell<Vec<String>>>,
    on_line: Rc<dyn Fn(&str)>,
}

impl Output {
    fn emit(&self, line: String) {
        (self.on_line)(&line);
        self.lines.borrow_mut().push(line);
    }
}

/// Run the demo and return the lines in execution order.
///
/// `on_line` sees every line the moment it is produced, so output up to a
/// failing step is not lost.
pub fn run<F>(scheduler: &mut Scheduler, on_line: F) -> Result<Vec<String>, ScheduleError>
where
    F: Fn(&str) + 'static,
{
    let output = Output {
        lines: Rc::default(),
        on_line: Rc::new(on_line),
    };
    let out = output.clone();

    output.emit("Task A".to_string());
    scheduler.run_loop(0, 2, move |s, i| {
        out.emit(format!(" Task B{i}"));

        let level_c = out.clone();
        s.run_loop(0, 2, move |s, j| {
            level_c.emit(format!("  Task C{i}{j}"));

            let level_d = level_c.clone();
            s.run_loop(0, 2, move |_, k| {
                level_d.emit(format!("   Task D{i}{j}{k}"));
                Ok(())
            })?;

            level_c.emit(format!("  Task E{i}{j}"));
            Ok(())
        })?;

        out.emit(format!(" Task F{i}"));
        Ok(())
    })?;
    output.emit("Task G".to_string());

    Ok(output.lines.take())
}
