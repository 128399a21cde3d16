/// The text of one open template, as last observed from its host buffer.
///
/// The host owns and mutates the real buffer; this input mirrors its content.
/// Every content change bumps `revision`, which downstream queries report as
/// the snapshot identity of their results.
#[salsa::input(debug)]
pub struct SourceBuffer {
    #[returns(ref)]
    pub text: String,
    pub revision: u64,
}
