//! Windows registry policy store
//!
//! Thin RAII wrapper over the `Reg*W` functions. Every operation opens the
//! key with the narrowest access it needs and closes it on drop.

use std::io;
use std::ptr;

use windows_sys::Win32::Foundation::{ERROR_FILE_NOT_FOUND, ERROR_SUCCESS};
use windows_sys::Win32::System::Registry::{
    RegCloseKey, RegCreateKeyExW, RegDeleteValueW, RegOpenKeyExW, RegQueryValueExW,
    RegSetValueExW, HKEY, HKEY_LOCAL_MACHINE, KEY_ALL_ACCESS, KEY_QUERY_VALUE, KEY_SET_VALUE,
    REG_DWORD, REG_OPTION_NON_VOLATILE, REG_SAM_FLAGS, REG_SZ,
};

use crate::error::{PolicyError, PolicyResult};
use crate::store::PolicyStore;

/// Null-terminated UTF-16 copy of `s`
fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn os_error(code: u32) -> io::Error {
    io::Error::from_raw_os_error(code as i32)
}

/// An open registry key, closed on drop
struct OwnedKey(HKEY);

impl Drop for OwnedKey {
    fn drop(&mut self) {
        // SAFETY: self.0 was returned by a successful RegOpenKeyExW/RegCreateKeyExW
        // and is closed exactly once here.
        unsafe {
            RegCloseKey(self.0);
        }
    }
}

/// Policy store over a registry hive
pub struct RegistryStore {
    root: HKEY,
}

impl RegistryStore {
    /// Store rooted at `HKEY_LOCAL_MACHINE`, where machine-wide browser
    /// policies live
    pub fn local_machine() -> Self {
        Self {
            root: HKEY_LOCAL_MACHINE,
        }
    }

    fn open(&self, path: &str, access: REG_SAM_FLAGS) -> io::Result<OwnedKey> {
        let subkey = wide(path);
        let mut handle: HKEY = 0;
        // SAFETY: subkey is null-terminated and outlives the call; handle is a
        // valid out pointer.
        let status = unsafe { RegOpenKeyExW(self.root, subkey.as_ptr(), 0, access, &mut handle) };
        if status != ERROR_SUCCESS {
            return Err(os_error(status));
        }
        Ok(OwnedKey(handle))
    }

    fn open_for_write(&self, path: &str) -> PolicyResult<OwnedKey> {
        self.open(path, KEY_SET_VALUE)
            .map_err(|source| PolicyError::OpenKey {
                path: path.to_string(),
                source,
            })
    }

    fn set_raw(&self, path: &str, name: &str, kind: u32, data: &[u8]) -> PolicyResult<()> {
        let key = self.open_for_write(path)?;
        let value_name = wide(name);
        // SAFETY: key is open with KEY_SET_VALUE, value_name is null-terminated,
        // data points to data.len() readable bytes.
        let status = unsafe {
            RegSetValueExW(
                key.0,
                value_name.as_ptr(),
                0,
                kind,
                data.as_ptr(),
                data.len() as u32,
            )
        };
        if status != ERROR_SUCCESS {
            return Err(PolicyError::SetValue {
                name: name.to_string(),
                source: os_error(status),
            });
        }
        Ok(())
    }
}

impl PolicyStore for RegistryStore {
    fn key_exists(&self, path: &str) -> bool {
        self.open(path, KEY_QUERY_VALUE).is_ok()
    }

    fn create_key(&mut self, path: &str) -> PolicyResult<()> {
        let subkey = wide(path);
        let mut handle: HKEY = 0;
        // SAFETY: all pointers are either valid for the duration of the call
        // or null where the API allows it.
        let status = unsafe {
            RegCreateKeyExW(
                self.root,
                subkey.as_ptr(),
                0,
                ptr::null(),
                REG_OPTION_NON_VOLATILE,
                KEY_ALL_ACCESS,
                ptr::null(),
                &mut handle,
                ptr::null_mut(),
            )
        };
        if status != ERROR_SUCCESS {
            return Err(PolicyError::CreateKey {
                path: path.to_string(),
                source: os_error(status),
            });
        }
        drop(OwnedKey(handle));
        Ok(())
    }

    fn set_dword(&mut self, path: &str, name: &str, value: u32) -> PolicyResult<()> {
        self.set_raw(path, name, REG_DWORD, &value.to_le_bytes())
    }

    fn set_string(&mut self, path: &str, name: &str, value: &str) -> PolicyResult<()> {
        let bytes: Vec<u8> = wide(value)
            .into_iter()
            .flat_map(|unit| unit.to_le_bytes())
            .collect();
        self.set_raw(path, name, REG_SZ, &bytes)
    }

    fn value_exists(&self, path: &str, name: &str) -> PolicyResult<bool> {
        let key = self
            .open(path, KEY_QUERY_VALUE)
            .map_err(|source| PolicyError::OpenKey {
                path: path.to_string(),
                source,
            })?;
        let value_name = wide(name);
        // SAFETY: only the existence is queried; every out pointer is null.
        let status = unsafe {
            RegQueryValueExW(
                key.0,
                value_name.as_ptr(),
                ptr::null(),
                ptr::null_mut(),
                ptr::null_mut(),
                ptr::null_mut(),
            )
        };
        match status {
            ERROR_SUCCESS => Ok(true),
            ERROR_FILE_NOT_FOUND => Ok(false),
            other => Err(PolicyError::QueryValue {
                name: name.to_string(),
                source: os_error(other),
            }),
        }
    }

    fn remove_value(&mut self, path: &str, name: &str) -> PolicyResult<()> {
        let key = self.open_for_write(path)?;
        let value_name = wide(name);
        // SAFETY: key is open with KEY_SET_VALUE and value_name is null-terminated.
        let status = unsafe { RegDeleteValueW(key.0, value_name.as_ptr()) };
        if status != ERROR_SUCCESS {
            return Err(PolicyError::DeleteValue {
                name: name.to_string(),
                source: os_error(status),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_is_null_terminated() {
        assert_eq!(wide("ab"), vec![b'a' as u16, b'b' as u16, 0]);
    }
}
