//! Spinners around the slow external commands.
//!
//! Package installs and dependency resolution can take tens of seconds each.
//! These decorators wrap the adapter ports and show an `indicatif` spinner on
//! stderr while the wrapped call runs. When hidden, they only delegate.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use gantry_core::{
    application::{PackageManager, ProjectTasks},
    error::GantryResult,
};

const TICK: Duration = Duration::from_millis(80);

fn spinner(visible: bool, message: String) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message);
    bar.enable_steady_tick(TICK);
    bar
}

fn run_with_spinner<T>(
    visible: bool,
    message: String,
    f: impl FnOnce() -> GantryResult<T>,
) -> GantryResult<T> {
    let bar = spinner(visible, message);
    let result = f();
    bar.finish_and_clear();
    result
}

/// [`PackageManager`] decorator that shows `Installing <package>`.
pub struct SpinnerPackageManager<P> {
    inner: P,
    visible: bool,
}

impl<P: PackageManager> SpinnerPackageManager<P> {
    pub fn new(inner: P, visible: bool) -> Self {
        Self { inner, visible }
    }
}

impl<P: PackageManager> PackageManager for SpinnerPackageManager<P> {
    fn install(&self, package: &str, version: &str, project: &Path) -> GantryResult<()> {
        run_with_spinner(self.visible, format!("Installing {package}"), || {
            self.inner.install(package, version, project)
        })
    }

    fn uninstall(&self, package: &str, project: &Path) -> GantryResult<()> {
        run_with_spinner(self.visible, format!("Removing {package}"), || {
            self.inner.uninstall(package, project)
        })
    }
}

/// [`ProjectTasks`] decorator.
pub struct SpinnerTasks<T> {
    inner: T,
    visible: bool,
}

impl<T: ProjectTasks> SpinnerTasks<T> {
    pub fn new(inner: T, visible: bool) -> Self {
        Self { inner, visible }
    }
}

impl<T: ProjectTasks> ProjectTasks for SpinnerTasks<T> {
    fn tidy(&self, project: &Path) -> GantryResult<()> {
        run_with_spinner(self.visible, "Installing dependencies".into(), || {
            self.inner.tidy(project)
        })
    }

    fn generate_key(&self, project: &Path) -> GantryResult<()> {
        run_with_spinner(self.visible, "Generating application key".into(), || {
            self.inner.generate_key(project)
        })
    }

    fn install_facades(&self, project: &Path) -> GantryResult<()> {
        run_with_spinner(self.visible, "Installing facades".into(), || {
            self.inner.install_facades(project)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use gantry_core::application::ApplicationError;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    impl PackageManager for Recorder {
        fn install(&self, package: &str, version: &str, _project: &Path) -> GantryResult<()> {
            self.calls.lock().unwrap().push(format!("install {package}@{version}"));
            if self.fail {
                return Err(ApplicationError::ExternalCommand {
                    command: "go run . artisan package:install".into(),
                    detail: "exit status: 1".into(),
                }
                .into());
            }
            Ok(())
        }

        fn uninstall(&self, package: &str, _project: &Path) -> GantryResult<()> {
            self.calls.lock().unwrap().push(format!("uninstall {package}"));
            Ok(())
        }
    }

    impl ProjectTasks for Recorder {
        fn tidy(&self, _project: &Path) -> GantryResult<()> {
            self.calls.lock().unwrap().push("tidy".into());
            Ok(())
        }

        fn generate_key(&self, _project: &Path) -> GantryResult<()> {
            self.calls.lock().unwrap().push("key".into());
            Ok(())
        }

        fn install_facades(&self, _project: &Path) -> GantryResult<()> {
            self.calls.lock().unwrap().push("facades".into());
            Ok(())
        }
    }

    #[test]
    fn package_calls_are_delegated() {
        let wrapped = SpinnerPackageManager::new(Recorder::default(), false);
        wrapped
            .install("github.com/gantry-dev/redis", "latest", Path::new("/tmp"))
            .unwrap();
        wrapped
            .uninstall("github.com/gantry-dev/postgres", Path::new("/tmp"))
            .unwrap();
        assert_eq!(
            *wrapped.inner.calls.lock().unwrap(),
            [
                "install github.com/gantry-dev/redis@latest",
                "uninstall github.com/gantry-dev/postgres"
            ]
        );
    }

    #[test]
    fn failures_pass_through() {
        let recorder = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let wrapped = SpinnerPackageManager::new(recorder, false);
        let err = wrapped
            .install("pkg", "latest", Path::new("/tmp"))
            .unwrap_err();
        assert!(err.to_string().contains("exit status: 1"));
    }

    #[test]
    fn task_calls_are_delegated() {
        let wrapped = SpinnerTasks::new(Recorder::default(), false);
        wrapped.tidy(Path::new("/tmp")).unwrap();
        wrapped.generate_key(Path::new("/tmp")).unwrap();
        wrapped.install_facades(Path::new("/tmp")).unwrap();
        assert_eq!(*wrapped.inner.calls.lock().unwrap(), ["tidy", "key", "facades"]);
    }
}
