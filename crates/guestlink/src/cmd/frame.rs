use guestlink_frame::frame;

use crate::cmd::FrameArgs;
use crate::exit::{frame_error, io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: FrameArgs, format: OutputFormat) -> CliResult<i32> {
    let payload = match (args.data, args.file) {
        (Some(data), None) => data.into_bytes(),
        (None, Some(path)) => std::fs::read(&path)
            .map_err(|err| io_error(&format!("reading {}", path.display()), err))?,
        _ => return Err(CliError::new(USAGE, "provide a payload via --data or --file")),
    };

    let framed = frame(&payload).map_err(|err| frame_error("framing payload", err))?;
    print_frame(framed.as_ref(), format);

    Ok(SUCCESS)
}
