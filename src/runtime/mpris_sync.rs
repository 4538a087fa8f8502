use crate::app::App;
use crate::handle::ObjectStore;
use crate::mpris::MprisHandle;

pub fn update_mpris<S: ObjectStore>(mpris: &MprisHandle, app: &App<S>) {
    let total = app.playback_info().and_then(|info| info.total);
    let now = app
        .widget
        .reference()
        .map(|r| (r, app.widget.file_name(), total));
    mpris.set_now_playing(now);
    mpris.set_playback(app.playback);
}
