fn main() {
    println!("cargo::rustc-check-cfg=cfg(nightly)");
    let is_nightly = rustc_version::version_meta()
        .is_ok_and(|meta| meta.channel == rustc_version::Channel::Nightly);
    if is_nightly {
        println!("cargo:rustc-cfg=nightly");
    }
    println!("cargo:rerun-if-changed=build.rs");
}
