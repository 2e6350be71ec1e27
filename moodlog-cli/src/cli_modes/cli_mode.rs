/// Whether a mode handled the invocation or the next one should try.
pub enum CliModeResult {
    Finish,
    NothingToDo,
}
