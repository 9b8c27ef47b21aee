use iotbuild_lib::platform::Platform;

pub fn cmd_info() {
  let host = Platform::current();
  println!("System:");
  println!("Platform: {}", host);
}
