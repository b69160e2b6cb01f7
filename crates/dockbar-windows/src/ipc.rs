use std::io::{BufRead, BufReader, Write};
use std::os::windows::io::FromRawHandle;

use dockbar_core::WindowResult;
use dockbar_core::ipc::{Command, PIPE_NAME, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use windows::Win32::Foundation::{
    CloseHandle, DUPLICATE_SAME_ACCESS, DuplicateHandle, HANDLE, INVALID_HANDLE_VALUE,
};
use windows::Win32::Storage::FileSystem::{
    CreateFileW, FILE_SHARE_NONE, FlushFileBuffers, OPEN_EXISTING, PIPE_ACCESS_DUPLEX,
};
use windows::Win32::System::Pipes::{
    ConnectNamedPipe, CreateNamedPipeW, DisconnectNamedPipe, PIPE_READMODE_BYTE, PIPE_TYPE_BYTE,
    PIPE_UNLIMITED_INSTANCES, PIPE_WAIT, WaitNamedPipeW,
};
use windows::Win32::System::Threading::GetCurrentProcess;
use windows::core::HSTRING;

const GENERIC_READ_WRITE: u32 = 0x80000000 | 0x40000000;

/// Bytes reserved for each direction of the pipe. Commands and
/// responses are single short JSON lines.
const PIPE_BUFFER: u32 = 512;

/// One daemon-side pipe instance. Each connection carries one request
/// line and one response line.
pub struct PipeServer {
    handle: HANDLE,
}

impl PipeServer {
    /// Creates the pipe instance without waiting for a client.
    pub fn create() -> WindowResult<Self> {
        let pipe_name = HSTRING::from(PIPE_NAME);

        // SAFETY: CreateNamedPipeW creates a new named pipe instance.
        // We pass valid parameters and check for INVALID_HANDLE_VALUE.
        let handle = unsafe {
            CreateNamedPipeW(
                &pipe_name,
                PIPE_ACCESS_DUPLEX,
                PIPE_TYPE_BYTE | PIPE_READMODE_BYTE | PIPE_WAIT,
                PIPE_UNLIMITED_INSTANCES,
                PIPE_BUFFER,
                PIPE_BUFFER,
                0,
                None,
            )
        };

        if handle == INVALID_HANDLE_VALUE {
            return Err(format!("failed to create pipe {PIPE_NAME}").into());
        }

        Ok(Self { handle })
    }

    /// Blocks until a client connects and reads its command.
    ///
    /// A line that isn't a valid command is answered with an error here
    /// and reported as `Ok(None)`, so the caller can keep listening.
    pub fn accept_command(&self) -> WindowResult<Option<Command>> {
        // SAFETY: ConnectNamedPipe blocks until a client connects.
        unsafe {
            ConnectNamedPipe(self.handle, None)?;
        }

        match read_json::<Command>(self.handle) {
            Ok(command) => Ok(Some(command)),
            Err(e) => {
                self.send_response(&Response::error(format!("invalid command: {e}")))?;
                Ok(None)
            }
        }
    }

    /// Sends the response to the connected client and disconnects.
    pub fn send_response(&self, response: &Response) -> WindowResult<()> {
        write_json(self.handle, response)?;

        // SAFETY: FlushFileBuffers waits until the client has read the
        // response; DisconnectNamedPipe would otherwise drop unread data.
        unsafe {
            let _ = FlushFileBuffers(self.handle);
            DisconnectNamedPipe(self.handle)?;
        }

        Ok(())
    }
}

impl Drop for PipeServer {
    fn drop(&mut self) {
        // SAFETY: the server owns its pipe handle exclusively.
        unsafe {
            let _ = CloseHandle(self.handle);
        }
    }
}

/// Closes a HANDLE on drop.
struct HandleGuard(HANDLE);

impl Drop for HandleGuard {
    fn drop(&mut self) {
        // SAFETY: the guard owns this handle exclusively.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Sends a command to the daemon and waits for its response.
pub fn send_command(command: &Command) -> WindowResult<Response> {
    let pipe_name = HSTRING::from(PIPE_NAME);

    // SAFETY: CreateFileW opens an existing named pipe as a client.
    let handle = unsafe {
        CreateFileW(
            &pipe_name,
            GENERIC_READ_WRITE,
            FILE_SHARE_NONE,
            None,
            OPEN_EXISTING,
            Default::default(),
            None,
        )?
    };
    let _guard = HandleGuard(handle);

    write_json(handle, command)?;
    read_json(handle)
}

/// Whether the daemon's pipe exists.
///
/// `WaitNamedPipeW` with a 1 ms timeout checks for an instance without
/// consuming the connection.
pub fn is_daemon_running() -> bool {
    let pipe_name = HSTRING::from(PIPE_NAME);

    // SAFETY: WaitNamedPipeW only queries pipe availability.
    unsafe { WaitNamedPipeW(&pipe_name, 1).as_bool() }
}

fn read_json<T: DeserializeOwned>(handle: HANDLE) -> WindowResult<T> {
    let mut reader = BufReader::new(handle_as_file(handle)?);
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(serde_json::from_str(line.trim())?)
}

fn write_json<T: Serialize>(handle: HANDLE, value: &T) -> WindowResult<()> {
    let mut writer = handle_as_file(handle)?;
    writeln!(writer, "{}", serde_json::to_string(value)?)?;
    writer.flush()?;
    Ok(())
}

/// Wraps a duplicate of `handle` in a `File`, so the `File` can close
/// its copy without closing the pipe.
fn handle_as_file(handle: HANDLE) -> WindowResult<std::fs::File> {
    let mut dup = HANDLE::default();

    // SAFETY: DuplicateHandle creates a copy owned by the returned File.
    unsafe {
        DuplicateHandle(
            GetCurrentProcess(),
            handle,
            GetCurrentProcess(),
            &mut dup,
            0,
            false,
            DUPLICATE_SAME_ACCESS,
        )?;

        Ok(std::fs::File::from_raw_handle(dup.0))
    }
}
