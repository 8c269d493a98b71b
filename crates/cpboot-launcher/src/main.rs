fn main() {
    cpboot_launcher::run_main();
}
