/// Ownership of an app's run state across init/frame/cleanup.
///
/// ```text
/// Pending --start(Ok)--> Running --finish--> Finished
///    \---start(Err)--> Failed --finish--> Failed (cleanup not run)
/// ```
///
/// `finish` consumes the state, so cleanup can observe it at most once.
#[derive(Debug)]
pub enum Lifecycle<S> {
    Pending,
    Running(S),
    Failed,
    Finished,
}

impl<S> Default for Lifecycle<S> {
    fn default() -> Self {
        Lifecycle::Pending
    }
}

impl<S> Lifecycle<S> {
    /// Runs `init` if nothing has been started yet.
    ///
    /// Calls after the first are no-ops returning `Ok(())`.
    pub fn start<E>(&mut self, init: impl FnOnce() -> Result<S, E>) -> Result<(), E> {
        if !matches!(self, Lifecycle::Pending) {
            return Ok(());
        }

        match init() {
            Ok(state) => {
                *self = Lifecycle::Running(state);
                Ok(())
            }
            Err(e) => {
                *self = Lifecycle::Failed;
                Err(e)
            }
        }
    }

    /// Mutable access to the state while running.
    #[inline]
    pub fn state_mut(&mut self) -> Option<&mut S> {
        match self {
            Lifecycle::Running(s) => Some(s),
            _ => None,
        }
    }

    /// Hands the state to `cleanup` if running. Returns whether cleanup ran.
    pub fn finish(&mut self, cleanup: impl FnOnce(S)) -> bool {
        match std::mem::replace(self, Lifecycle::Finished) {
            Lifecycle::Running(state) => {
                cleanup(state);
                true
            }
            Lifecycle::Failed => {
                *self = Lifecycle::Failed;
                false
            }
            Lifecycle::Pending | Lifecycle::Finished => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleanup_runs_once_after_successful_start() {
        let mut lc: Lifecycle<u32> = Lifecycle::default();
        lc.start(|| Ok::<_, ()>(7)).unwrap();
        assert!(matches!(lc, Lifecycle::Running(7)));

        let mut seen = Vec::new();
        assert!(lc.finish(|s| seen.push(s)));
        assert!(!lc.finish(|s| seen.push(s)));
        assert_eq!(seen, vec![7]);
        assert!(matches!(lc, Lifecycle::Finished));
    }

    #[test]
    fn cleanup_skipped_after_failed_start() {
        let mut lc: Lifecycle<u32> = Lifecycle::default();
        assert_eq!(lc.start(|| Err::<u32, _>("no adapter")), Err("no adapter"));
        assert!(lc.state_mut().is_none());

        let mut ran = false;
        assert!(!lc.finish(|_| ran = true));
        assert!(!ran);
        assert!(matches!(lc, Lifecycle::Failed));
    }

    #[test]
    fn cleanup_skipped_when_never_started() {
        let mut lc: Lifecycle<u32> = Lifecycle::default();
        let mut ran = false;
        assert!(!lc.finish(|_| ran = true));
        assert!(!ran);
    }

    #[test]
    fn start_is_one_shot() {
        let mut lc: Lifecycle<u32> = Lifecycle::default();
        lc.start(|| Ok::<_, ()>(1)).unwrap();

        let mut called = false;
        lc.start(|| {
            called = true;
            Ok::<_, ()>(2)
        })
        .unwrap();
        assert!(!called);
        assert_eq!(lc.state_mut().copied(), Some(1));
    }

    #[test]
    fn no_restart_after_finish() {
        let mut lc: Lifecycle<u32> = Lifecycle::default();
        lc.start(|| Ok::<_, ()>(1)).unwrap();
        lc.finish(drop);
        lc.start(|| Ok::<_, ()>(2)).unwrap();
        assert!(lc.state_mut().is_none());
    }
}
