use whisper_drv::CompileError;

fn main() {
    match whisper_drv::main() {
        Ok(output) => {
            println!("{output}");
        }
        Err(err) => {
            match err.downcast_ref::<CompileError>() {
                Some(compile_err) => eprintln!("error[{}]: {compile_err}", compile_err.code()),
                None => match err.downcast_ref::<clap::Error>() {
                    // clap's own Display already renders a full "error: ..." usage message.
                    Some(clap_err) => eprint!("{clap_err}"),
                    None => eprintln!("error: {err}"),
                },
            }
            std::process::exit(1);
        }
    }
}
