fn main() {
    arena_duel::game::run();
}
