/// Acquires an access token and prints it to stdout for use with other tools.
///
/// The token is printed bare on its own line so it can be captured, e.g.
/// `TOKEN=$(apiprobe token)`. Nothing else is written on success.
pub async fn token() {
    let session = super::open_session(false).await;
    println!("{}", session.token().as_str());
}
